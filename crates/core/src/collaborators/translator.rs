use crate::traits::Translator;
use crate::TranslationError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_MYMEMORY_URL: &str = "https://api.mymemory.translated.net";

/// MyMemory REST translator: `GET /get?q=<text>&langpair=<src>|<dst>`.
pub struct MyMemoryTranslator {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    fn request_url(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<Url, TranslationError> {
        let mut url = Url::parse(&format!("{}/get", self.endpoint.trim_end_matches('/')))?;
        url.query_pairs_mut()
            .append_pair("q", text)
            .append_pair("langpair", &format!("{source_lang}|{target_lang}"));
        Ok(url)
    }
}

impl Default for MyMemoryTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_MYMEMORY_URL)
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        let url = self.request_url(text, source_lang, target_lang)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::BackendResponse {
                status: status.as_u16(),
                details: response.text().await.unwrap_or_default(),
            });
        }

        let payload: MyMemoryResponse = response.json().await.map_err(|error| {
            if error.is_decode() {
                TranslationError::MalformedResponse(error.to_string())
            } else {
                TranslationError::Http(error)
            }
        })?;
        translated_text(payload)
    }
}

fn translated_text(payload: MyMemoryResponse) -> Result<String, TranslationError> {
    payload
        .response_data
        .and_then(|data| data.translated_text)
        .ok_or_else(|| {
            TranslationError::MalformedResponse("missing responseData.translatedText".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::canned::serve_once;

    #[test]
    fn request_url_carries_text_and_language_pair() -> Result<(), Box<dyn std::error::Error>> {
        let translator = MyMemoryTranslator::new("https://translate.example/");
        let url = translator.request_url("hello world", "en", "pt")?;

        assert_eq!(url.path(), "/get");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "hello world".to_string()),
                ("langpair".to_string(), "en|pt".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn translated_text_is_read_from_response_data() -> Result<(), Box<dyn std::error::Error>> {
        let payload: MyMemoryResponse = serde_json::from_str(
            r#"{"responseData":{"translatedText":"olá","match":1},"responseStatus":200}"#,
        )?;
        assert_eq!(translated_text(payload)?, "olá");
        Ok(())
    }

    #[test]
    fn missing_translation_is_malformed() -> Result<(), Box<dyn std::error::Error>> {
        let payload: MyMemoryResponse = serde_json::from_str(r#"{"responseStatus":403}"#)?;
        assert!(matches!(
            translated_text(payload),
            Err(TranslationError::MalformedResponse(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_service_is_backend_response() -> Result<(), Box<dyn std::error::Error>> {
        let base = serve_once("503 Service Unavailable", r#"{"error":"busy"}"#).await?;
        let translator = MyMemoryTranslator::new(base);

        let result = translator.translate("hello", "en", "pt").await;
        assert!(matches!(
            result,
            Err(TranslationError::BackendResponse { status: 503, .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn successful_translation_is_returned() -> Result<(), Box<dyn std::error::Error>> {
        let base = serve_once("200 OK", r#"{"responseData":{"translatedText":"olá"}}"#).await?;
        let translator = MyMemoryTranslator::new(base);

        assert_eq!(translator.translate("hello", "en", "pt").await?, "olá");
        Ok(())
    }
}
