//! Calls `emailjs.send` on the EmailJS browser SDK loaded by the page.

use anyhow::{Context, Result, anyhow};
use folio_protocol::MessagePayload;
use js_sys::{Function, JSON, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::dom::js_err;

pub async fn send(service_id: &str, template_id: &str, payload: &MessagePayload) -> Result<()> {
    let sdk = Reflect::get(&js_sys::global(), &JsValue::from_str("emailjs"))
        .map_err(js_err)
        .context("reading window.emailjs")?;
    if sdk.is_undefined() {
        return Err(anyhow!("EmailJS SDK is not loaded"));
    }
    let send: Function = Reflect::get(&sdk, &JsValue::from_str("send"))
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| anyhow!("emailjs.send is not a function"))?;

    let json = serde_json::to_string(payload).context("encoding template params")?;
    let params = JSON::parse(&json).map_err(js_err)?;
    let promise: Promise = send
        .call3(
            &sdk,
            &JsValue::from_str(service_id),
            &JsValue::from_str(template_id),
            &params,
        )
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| anyhow!("emailjs.send did not return a promise"))?;
    JsFuture::from(promise)
        .await
        .map_err(js_err)
        .context("emailjs.send rejected")?;
    Ok(())
}
