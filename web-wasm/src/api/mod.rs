//! ブラウザ向けの画像読み出しとmultipart送信
//!
//! 選択画像はオブジェクトURLで保持しているので、送信直前にfetchしてバイト列に戻す。

use js_sys::{Array, Uint8Array};
use safe_street_common::upload::{ImageSource, RawResponse, Transport, UploadForm, UploadPart};
use safe_street_common::{AnalyzeError, PickedImage};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response, Url};

/// オブジェクトURLから画像を読み出す
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobImageSource;

impl ImageSource for BlobImageSource {
    async fn to_upload_part(
        &self,
        image: &PickedImage,
        field_name: &str,
    ) -> Result<UploadPart, AnalyzeError> {
        let bytes = read_object_url(&image.uri)
            .await
            .map_err(|e| AnalyzeError::Preparation(js_error_message(&e)))?;

        Ok(UploadPart {
            field_name: field_name.to_string(),
            file_name: image.name.clone(),
            mime_type: image.mime_type.clone(),
            bytes,
        })
    }
}

/// `window.fetch` で送信する
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post_multipart(&self, url: &str, form: UploadForm) -> Result<RawResponse, AnalyzeError> {
        let no_response = |e: JsValue| AnalyzeError::NoResponse(js_error_message(&e));

        let prepare = |e: JsValue| AnalyzeError::Preparation(js_error_message(&e));
        let url = request_url(url, &form.query).map_err(prepare)?;
        let body = to_form_data(&form).map_err(prepare)?;

        // Content-Type はブラウザが boundary 付きで付与する
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&body.into());

        let request = Request::new_with_str_and_init(&url, &opts).map_err(no_response)?;
        let window = web_sys::window().ok_or_else(|| AnalyzeError::NoResponse("window unavailable".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(no_response)?;
        let resp: Response = resp_value.dyn_into().map_err(no_response)?;

        let status = resp.status();
        let text = match resp.text() {
            Ok(promise) => JsFuture::from(promise).await,
            Err(e) => Err(e),
        };
        let body = match text {
            Ok(text) => text.as_string().unwrap_or_default(),
            // ステータスは受信済み。本文が読めなくてもサーバーエラーとして扱う
            Err(_) if !resp.ok() => String::new(),
            Err(e) => return Err(no_response(e)),
        };

        Ok(RawResponse { status, body })
    }
}

async fn read_object_url(uri: &str) -> Result<Vec<u8>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let resp: Response = JsFuture::from(window.fetch_with_str(uri)).await?.dyn_into()?;
    let buffer = JsFuture::from(resp.array_buffer()?).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// クエリパラメータ付きのURL（`email` など）
pub fn request_url(url: &str, query: &[(String, String)]) -> Result<String, JsValue> {
    if query.is_empty() {
        return Ok(url.to_string());
    }
    let parsed = Url::new(url)?;
    let params = parsed.search_params();
    for (name, value) in query {
        params.append(name, value);
    }
    Ok(parsed.href())
}

/// `UploadForm` のファイルを FormData に詰める
pub fn to_form_data(form: &UploadForm) -> Result<FormData, JsValue> {
    let data = FormData::new()?;

    let bytes = Uint8Array::from(form.file.bytes.as_slice());
    let bag = BlobPropertyBag::new();
    bag.set_type(&form.file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&Array::of1(&bytes), &bag)?;
    data.append_with_blob_and_filename(&form.file.field_name, &blob, &form.file.file_name)?;
    Ok(data)
}

/// JS例外から表示用メッセージを取り出す（fetch失敗時は "Failed to fetch" など）
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string()
        .unwrap_or_else(|| "Network request failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_form() -> UploadForm {
        UploadForm::new(UploadPart {
            field_name: "roadImage".into(),
            file_name: "crack.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        })
        .with_query("email", "ops@example.com")
    }

    #[wasm_bindgen_test]
    fn test_form_data_contains_only_the_file() {
        let data = to_form_data(&sample_form()).unwrap();

        let file: web_sys::File = data.get("roadImage").dyn_into().unwrap();
        assert_eq!(file.name(), "crack.png");
        assert_eq!(file.type_(), "image/png");
        assert_eq!(file.size(), 4.0);
        assert!(data.get("email").is_null());
    }

    #[wasm_bindgen_test]
    fn test_email_goes_to_query_string() {
        let query = vec![("email".to_string(), "ops+road@example.com".to_string())];
        let url = request_url("http://localhost:8000/analyze", &query).unwrap();
        assert_eq!(url, "http://localhost:8000/analyze?email=ops%2Broad%40example.com");
        assert_eq!(
            request_url("http://localhost:8000/analyze", &[]).unwrap(),
            "http://localhost:8000/analyze"
        );
    }

    #[wasm_bindgen_test]
    fn test_js_error_message() {
        let err: JsValue = js_sys::Error::new("Failed to fetch").into();
        assert_eq!(js_error_message(&err), "Failed to fetch");
        assert_eq!(js_error_message(&JsValue::from_str("boom")), "boom");
        assert_eq!(js_error_message(&JsValue::NULL), "Network request failed");
    }

    #[wasm_bindgen_test]
    async fn test_unreachable_backend_is_no_response() {
        let err = FetchTransport
            .post_multipart("http://127.0.0.1:9/analyze", sample_form())
            .await
            .unwrap_err();
        assert!(err.is_connection_error());
        assert!(matches!(err, AnalyzeError::NoResponse(_)));
    }
}
