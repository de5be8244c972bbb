//! Firebase Authentication bridge.
//!
//! The JS SDK is loaded lazily from the gstatic CDN the first time any call needs it. All calls
//! share one `Auth` instance per page.

use platform_host::{IdentityListener, ServiceError};

#[cfg(target_arch = "wasm32")]
mod imp {
    use js_sys::{Function, Promise};
    use platform_host::{Identity, IdentityListener, ServiceError};
    use wasm_bindgen::{prelude::*, JsCast};
    use wasm_bindgen_futures::JsFuture;

    use crate::bridge::interop::js_error_to_string;

    #[wasm_bindgen(inline_js = r#"
const SDK_BASE = 'https://www.gstatic.com/firebasejs/10.5.2';

let authPromise = null;

function loadAuth(configJson) {
  if (!authPromise) {
    authPromise = (async () => {
      const { initializeApp } = await import(`${SDK_BASE}/firebase-app.js`);
      const sdk = await import(`${SDK_BASE}/firebase-auth.js`);
      const app = initializeApp(JSON.parse(configJson));
      return { sdk, auth: sdk.getAuth(app) };
    })();
  }
  return authPromise;
}

export async function firebaseSubscribe(configJson, listener) {
  const { sdk, auth } = await loadAuth(configJson);
  // Fires on sign-in, sign-out and every token refresh, so the token handed to Rust stays
  // current. getIdToken is async; chaining keeps notifications in platform order.
  let chain = Promise.resolve();
  sdk.onIdTokenChanged(auth, (user) => {
    chain = chain
      .then(async () => {
        if (!user) {
          listener(null);
          return;
        }
        const accessToken = await user.getIdToken();
        listener({
          uid: user.uid,
          accessToken,
          displayName: user.displayName ?? null,
          isAnonymous: user.isAnonymous,
        });
      })
      .catch((err) => console.error('identity notification failed', err));
  });
}

export async function firebaseSignInAnonymously(configJson) {
  const { sdk, auth } = await loadAuth(configJson);
  await sdk.signInAnonymously(auth);
}

export async function firebaseSignInWithGoogle(configJson) {
  const { sdk, auth } = await loadAuth(configJson);
  await sdk.signInWithPopup(auth, new sdk.GoogleAuthProvider());
}

export async function firebaseSignOut(configJson) {
  const { sdk, auth } = await loadAuth(configJson);
  await sdk.signOut(auth);
}
"#)]
    extern "C" {
        #[wasm_bindgen(js_name = firebaseSubscribe)]
        fn js_firebase_subscribe(config_json: &str, listener: &Function) -> Promise;
        #[wasm_bindgen(js_name = firebaseSignInAnonymously)]
        fn js_firebase_sign_in_anonymously(config_json: &str) -> Promise;
        #[wasm_bindgen(js_name = firebaseSignInWithGoogle)]
        fn js_firebase_sign_in_with_google(config_json: &str) -> Promise;
        #[wasm_bindgen(js_name = firebaseSignOut)]
        fn js_firebase_sign_out(config_json: &str) -> Promise;
    }

    async fn await_promise(promise: Promise) -> Result<(), ServiceError> {
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|err| ServiceError::Identity(js_error_to_string(err)))
    }

    pub async fn subscribe(config_json: &str, listener: IdentityListener) -> Result<(), ServiceError> {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            match serde_wasm_bindgen::from_value::<Option<Identity>>(value) {
                Ok(identity) => listener(identity),
                Err(err) => web_sys::console::error_1(&JsValue::from_str(&format!(
                    "undecodable identity payload: {err}"
                ))),
            }
        });
        let result =
            await_promise(js_firebase_subscribe(config_json, callback.as_ref().unchecked_ref()))
                .await;
        // The platform keeps the listener for the lifetime of the page.
        callback.forget();
        result
    }

    pub async fn sign_in_anonymously(config_json: &str) -> Result<(), ServiceError> {
        await_promise(js_firebase_sign_in_anonymously(config_json)).await
    }

    pub async fn sign_in_with_google(config_json: &str) -> Result<(), ServiceError> {
        await_promise(js_firebase_sign_in_with_google(config_json)).await
    }

    pub async fn sign_out(config_json: &str) -> Result<(), ServiceError> {
        await_promise(js_firebase_sign_out(config_json)).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use platform_host::{IdentityListener, ServiceError};

    const UNSUPPORTED: ServiceError = ServiceError::Unsupported("firebase authentication");

    pub async fn subscribe(
        _config_json: &str,
        _listener: IdentityListener,
    ) -> Result<(), ServiceError> {
        Err(UNSUPPORTED)
    }

    pub async fn sign_in_anonymously(_config_json: &str) -> Result<(), ServiceError> {
        Err(UNSUPPORTED)
    }

    pub async fn sign_in_with_google(_config_json: &str) -> Result<(), ServiceError> {
        Err(UNSUPPORTED)
    }

    pub async fn sign_out(_config_json: &str) -> Result<(), ServiceError> {
        Err(UNSUPPORTED)
    }
}

pub async fn subscribe(config_json: &str, listener: IdentityListener) -> Result<(), ServiceError> {
    imp::subscribe(config_json, listener).await
}

pub async fn sign_in_anonymously(config_json: &str) -> Result<(), ServiceError> {
    imp::sign_in_anonymously(config_json).await
}

pub async fn sign_in_with_google(config_json: &str) -> Result<(), ServiceError> {
    imp::sign_in_with_google(config_json).await
}

pub async fn sign_out(config_json: &str) -> Result<(), ServiceError> {
    imp::sign_out(config_json).await
}
