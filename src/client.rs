//! 検証エンドポイントへのHTTPクライアント

use crate::error::{DocVerifyError, Result};
use doc_verify_common::protocol::{multipart_text_fields, MULTIPART_FILE_FIELD};
use doc_verify_common::{
    parse_response, AnalysisError, AnalysisRequest, AnalysisResult, Analyzer, ClientConfig,
    JsonPayload, RequestFormat,
};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

pub struct HttpAnalyzer {
    client: Client,
    config: ClientConfig,
}

impl HttpAnalyzer {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| DocVerifyError::Config(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DocVerifyError::HttpClient(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn map_error(&self, error: reqwest::Error) -> AnalysisError {
        if error.is_timeout() {
            AnalysisError::Timeout(self.config.timeout_seconds)
        } else {
            AnalysisError::Transport(error.to_string())
        }
    }

    fn multipart_form(request: &AnalysisRequest) -> std::result::Result<Form, AnalysisError> {
        let fields = multipart_text_fields(request)?;
        let part = Part::bytes(request.file.bytes.clone())
            .file_name(request.file.name.clone())
            .mime_str(&request.file.mime_type)
            .map_err(|e| AnalysisError::Encoding(e.to_string()))?;

        let mut form = Form::new().part(MULTIPART_FILE_FIELD, part);
        for (name, value) in fields {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

impl Analyzer for HttpAnalyzer {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<AnalysisResult, AnalysisError> {
        let mut builder = self.client.post(&self.config.endpoint);
        if let Some(key) = self.config.api_key() {
            builder = builder.header(self.config.api_key_header.as_str(), key);
        }

        builder = match self.config.request_format {
            RequestFormat::Json => builder.json(&JsonPayload::from_request(request)?),
            RequestFormat::Multipart => builder.multipart(Self::multipart_form(request)?),
        };

        tracing::debug!(
            endpoint = %self.config.endpoint,
            format = %self.config.request_format,
            size = request.file.size(),
            "sending analysis request"
        );

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "analysis endpoint returned an error status");
            return Err(AnalysisError::Request {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        parse_response(status.as_u16(), &body)
    }
}
