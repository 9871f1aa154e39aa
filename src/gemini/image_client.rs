use crate::{
    encode::{self, DEFAULT_OUTPUT_MIME},
    error::{Result, ToonifyError},
    models::CartoonStyle,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for the Gemini `generateContent` endpoint.
///
/// Holds no mutable state; a single instance can serve any number of
/// concurrent `stylize` calls.
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model_id: String,
}

impl ImageClient {
    pub fn new(client: Client, api_key: String, base_url: String, model_id: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model_id,
        }
    }

    /// Sends one image plus the style's instruction to the model and returns
    /// the stylized image as a data URL.
    ///
    /// One round trip, no retry. Failures surface as typed errors: transport
    /// and HTTP-level problems as [`ToonifyError::ServiceError`], response
    /// shapes without an image as the response-shape variants.
    pub async fn stylize(&self, encoded_image: &str, style: CartoonStyle) -> Result<String> {
        let mime_type = encode::mime_type_of(encoded_image);
        let payload = encode::strip_prefix(encoded_image);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    RequestPart::InlineData {
                        inline_data: RequestInlineData {
                            mime_type: mime_type.to_string(),
                            data: payload.to_string(),
                        },
                    },
                    RequestPart::Text {
                        text: style.prompt().to_string(),
                    },
                ],
            }],
        };

        log::info!(
            "Requesting {} stylization from model: {}",
            style.label(),
            self.model_id
        );

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model_id);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ToonifyError::ServiceError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToonifyError::ServiceError(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ToonifyError::SerializationError(e.to_string()))?;

        extract_image(response)
    }
}

/// Picks the result out of the response parts, in order: the first part
/// carrying inline image data wins; otherwise the first text part becomes a
/// [`ToonifyError::TextOnlyResponse`] (the model may explain a refusal in
/// prose); otherwise [`ToonifyError::NoImageInResponse`]. A response with no
/// parts at all is [`ToonifyError::EmptyResponse`].
fn extract_image(response: GenerateContentResponse) -> Result<String> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .ok_or(ToonifyError::EmptyResponse)?;

    if parts.is_empty() {
        return Err(ToonifyError::EmptyResponse);
    }

    for part in &parts {
        if let Some(inline) = &part.inline_data {
            if !inline.data.is_empty() {
                let mime_type = inline.mime_type.as_deref().unwrap_or(DEFAULT_OUTPUT_MIME);
                return Ok(format!("data:{};base64,{}", mime_type, inline.data));
            }
        }
    }

    if let Some(text) = parts.iter().find_map(|part| part.text.as_ref()) {
        return Err(ToonifyError::TextOnlyResponse(text.clone()));
    }

    Err(ToonifyError::NoImageInResponse)
}

// Wire types for the generateContent request/response.

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: RequestInlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<ResponseInlineData>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_part(mime_type: Option<&str>, data: &str) -> ResponsePart {
        ResponsePart {
            inline_data: Some(ResponseInlineData {
                mime_type: mime_type.map(String::from),
                data: data.to_string(),
            }),
            text: None,
        }
    }

    fn text_part(text: &str) -> ResponsePart {
        ResponsePart {
            inline_data: None,
            text: Some(text.to_string()),
        }
    }

    fn response_with_parts(parts: Vec<ResponsePart>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(ResponseContent { parts }),
            }],
        }
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    RequestPart::InlineData {
                        inline_data: RequestInlineData {
                            mime_type: "image/jpeg".to_string(),
                            data: "abcd".to_string(),
                        },
                    },
                    RequestPart::Text {
                        text: "make it a cartoon".to_string(),
                    },
                ],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "abcd");
        assert_eq!(parts[1]["text"], "make it a cartoon");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": {
                            "mimeType": "image/png",
                            "data": "iVBORw0KGgo="
                        }
                    }]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let inline = response.candidates[0].content.as_ref().unwrap().parts[0]
            .inline_data
            .as_ref()
            .unwrap();
        assert_eq!(inline.mime_type.as_deref(), Some("image/png"));
        assert_eq!(inline.data, "iVBORw0KGgo=");
    }

    #[test]
    fn test_extract_image_first_image_wins() {
        let response = response_with_parts(vec![
            text_part("here is your image"),
            image_part(Some("image/png"), "AAAA"),
            image_part(Some("image/jpeg"), "BBBB"),
        ]);
        let data_url = extract_image(response).unwrap();
        assert_eq!(data_url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_extract_image_defaults_missing_mime_to_png() {
        let response = response_with_parts(vec![image_part(None, "AAAA")]);
        assert_eq!(
            extract_image(response).unwrap(),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_extract_image_text_only_carries_detail() {
        let response = response_with_parts(vec![text_part("cannot process this image")]);
        match extract_image(response) {
            Err(ToonifyError::TextOnlyResponse(text)) => {
                assert_eq!(text, "cannot process this image");
            }
            other => panic!("expected TextOnlyResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_image_empty_data_falls_through_to_text() {
        // An inline part with an empty payload does not count as an image.
        let response = response_with_parts(vec![
            image_part(Some("image/png"), ""),
            text_part("generation failed"),
        ]);
        assert!(matches!(
            extract_image(response),
            Err(ToonifyError::TextOnlyResponse(_))
        ));
    }

    #[test]
    fn test_extract_image_no_candidates_is_empty_response() {
        let response = GenerateContentResponse { candidates: vec![] };
        assert!(matches!(
            extract_image(response),
            Err(ToonifyError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_image_candidate_without_content_is_empty_response() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate { content: None }],
        };
        assert!(matches!(
            extract_image(response),
            Err(ToonifyError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_image_zero_parts_is_empty_response() {
        let response = response_with_parts(vec![]);
        assert!(matches!(
            extract_image(response),
            Err(ToonifyError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_image_no_usable_parts() {
        let response = response_with_parts(vec![ResponsePart {
            inline_data: None,
            text: None,
        }]);
        assert!(matches!(
            extract_image(response),
            Err(ToonifyError::NoImageInResponse)
        ));
    }
}
