//! Identity platform service contracts and the in-memory adapter.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use super::types::Identity;
use crate::ServiceError;

/// Object-safe boxed future used by [`IdentityService`] async methods.
pub type IdentityFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Callback invoked with every identity-state change (`None` when signed out).
pub type IdentityListener = Rc<dyn Fn(Option<Identity>)>;

/// Host service wrapping the third-party identity platform.
///
/// Sign-in and sign-out calls only start the flow. Their outcome is observed through the
/// listener registered with [`IdentityService::subscribe`].
pub trait IdentityService {
    /// Registers a listener. It fires once with the current state, then on every sign-in,
    /// sign-out and access-token refresh.
    fn subscribe<'a>(
        &'a self,
        listener: IdentityListener,
    ) -> IdentityFuture<'a, Result<(), ServiceError>>;

    /// Starts an anonymous session.
    fn sign_in_anonymously<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>>;

    /// Opens the Google popup sign-in flow.
    fn sign_in_with_google<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>>;

    /// Ends the current session.
    fn sign_out<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Call recorded by [`MemoryIdentityService`].
pub enum IdentityCall {
    /// [`IdentityService::subscribe`].
    Subscribe,
    /// [`IdentityService::sign_in_anonymously`].
    SignInAnonymously,
    /// [`IdentityService::sign_in_with_google`].
    SignInWithGoogle,
    /// [`IdentityService::sign_out`].
    SignOut,
}

#[derive(Default)]
struct MemoryIdentityState {
    listeners: Vec<IdentityListener>,
    current: Option<Identity>,
    google_account: Option<Identity>,
    anonymous_sessions: u64,
    calls: Vec<IdentityCall>,
    fail_next: Option<ServiceError>,
}

#[derive(Clone, Default)]
/// In-memory identity platform that notifies listeners synchronously.
///
/// Anonymous sign-ins mint `anon-<n>` users with `anon-token-<n>` tokens. Google sign-in yields
/// the account configured with [`MemoryIdentityService::with_google_account`].
pub struct MemoryIdentityService {
    inner: Rc<RefCell<MemoryIdentityState>>,
}

impl MemoryIdentityService {
    /// Configures the account returned by the Google popup flow.
    pub fn with_google_account(self, account: Identity) -> Self {
        self.inner.borrow_mut().google_account = Some(account);
        self
    }

    /// Returns the identity currently signed in.
    pub fn current(&self) -> Option<Identity> {
        self.inner.borrow().current.clone()
    }

    /// Returns every call made so far, in order.
    pub fn calls(&self) -> Vec<IdentityCall> {
        self.inner.borrow().calls.clone()
    }

    /// Makes the next sign-in or sign-out call fail with `error`.
    pub fn fail_next(&self, error: ServiceError) {
        self.inner.borrow_mut().fail_next = Some(error);
    }

    /// Rotates the current user's access token and notifies every listener, as the platform does
    /// when a token expires. Does nothing while signed out.
    pub fn refresh_token(&self, access_token: impl Into<String>) {
        let Some(mut identity) = self.current() else {
            return;
        };
        identity.access_token = access_token.into();
        self.emit(Some(identity));
    }

    /// Replaces the current identity and notifies every listener.
    pub fn emit(&self, identity: Option<Identity>) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            inner.current = identity.clone();
            inner.listeners.clone()
        };
        for listener in listeners {
            listener(identity.clone());
        }
    }

    fn record(&self, call: IdentityCall) -> Result<(), ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        match inner.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl IdentityService for MemoryIdentityService {
    fn subscribe<'a>(
        &'a self,
        listener: IdentityListener,
    ) -> IdentityFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            let current = {
                let mut inner = self.inner.borrow_mut();
                inner.calls.push(IdentityCall::Subscribe);
                inner.listeners.push(listener.clone());
                inner.current.clone()
            };
            listener(current);
            Ok(())
        })
    }

    fn sign_in_anonymously<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            self.record(IdentityCall::SignInAnonymously)?;
            let identity = {
                let mut inner = self.inner.borrow_mut();
                inner.anonymous_sessions += 1;
                let n = inner.anonymous_sessions;
                Identity::anonymous(format!("anon-{n}"), format!("anon-token-{n}"))
            };
            self.emit(Some(identity));
            Ok(())
        })
    }

    fn sign_in_with_google<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            self.record(IdentityCall::SignInWithGoogle)?;
            let account = self.inner.borrow().google_account.clone();
            let account = account
                .ok_or_else(|| ServiceError::Identity("popup closed by user".to_string()))?;
            self.emit(Some(account));
            Ok(())
        })
    }

    fn sign_out<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            self.record(IdentityCall::SignOut)?;
            self.emit(None);
            Ok(())
        })
    }
}
