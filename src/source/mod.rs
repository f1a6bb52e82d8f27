pub mod fallback;

use crate::error::{ConspiraError, Result};
use crate::types::config::SourceSettings;
use crate::types::observation::LunarObservation;
use chrono::Utc;
use std::time::Duration;

/// Anything that can hand the engine a current lunar observation.
pub trait AstronomySource {
    fn fetch(&self) -> Result<LunarObservation>;
}

/// Blocking client for an ipgeolocation-style astronomy endpoint.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    endpoint: String,
    query: Vec<(String, String)>,
}

impl HttpSource {
    pub fn from_settings(settings: &SourceSettings) -> Result<Self> {
        let api_key = match &settings.api_key {
            Some(key) => key.clone(),
            None => std::env::var(&settings.api_key_env)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    ConspiraError::MissingCredential(format!(
                        "set source.api_key or the {} environment variable",
                        settings.api_key_env
                    ))
                })?,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("conspira/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ConspiraError::UpstreamUnavailable(format!("failed to build HTTP client: {e}"))
            })?;

        let mut query = vec![("apiKey".to_string(), api_key)];
        if let Some(location) = &settings.location {
            query.push(("location".to_string(), location.clone()));
        }
        if let Some((lat, long)) = settings.coordinates {
            query.push(("lat".to_string(), lat.to_string()));
            query.push(("long".to_string(), long.to_string()));
        }

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            query,
        })
    }
}

impl AstronomySource for HttpSource {
    fn fetch(&self) -> Result<LunarObservation> {
        tracing::info!(endpoint = %self.endpoint, "requesting astronomy snapshot");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query)
            .send()
            .map_err(|e| ConspiraError::UpstreamUnavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConspiraError::UpstreamUnavailable(format!(
                "astronomy API returned {status}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .map_err(|e| ConspiraError::MalformedPayload(e.to_string()))?;
        let observation = LunarObservation::from_payload(&payload, Utc::now()).ok_or_else(|| {
            ConspiraError::MalformedPayload("expected a JSON object".to_string())
        })?;

        tracing::debug!(
            phase = %observation.phase,
            illumination = ?observation.illumination_percent,
            distance_km = ?observation.distance_km,
            "parsed astronomy snapshot"
        );
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves one canned HTTP response and returns the request line it saw.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let addr = listener.local_addr().expect("listener should have an address");
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("client should connect");
            let mut reader = BufReader::new(stream.try_clone().expect("stream should clone"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line should read");
            loop {
                let mut header = String::new();
                let read = reader.read_line(&mut header).expect("header should read");
                if read == 0 || header == "\r\n" {
                    break;
                }
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .expect("response should write");
            request_line
        });
        (format!("http://{addr}/astronomy"), handle)
    }

    fn settings(endpoint: String) -> SourceSettings {
        SourceSettings {
            endpoint,
            api_key: Some("test-key".to_string()),
            api_key_env: "CONSPIRA_TEST_UNUSED_KEY".to_string(),
            timeout_secs: 5,
            location: Some("Lisbon".to_string()),
            coordinates: None,
        }
    }

    #[test]
    fn fetch_parses_successful_payload() {
        let (endpoint, handle) = serve_once(
            "200 OK",
            r#"{"moon_phase":"FULL_MOON","moon_illumination_percentage":"98.4","moon_distance":361234.5,"location":{"location_string":"Lisbon, Portugal"}}"#,
        );
        let source = HttpSource::from_settings(&settings(endpoint)).expect("source should build");

        let observation = source.fetch().expect("fetch should succeed");
        assert_eq!(observation.phase, "FULL_MOON");
        assert_eq!(observation.illumination_percent, Some(98.4));
        assert_eq!(observation.distance_km, Some(361_234.5));
        assert_eq!(observation.location.as_deref(), Some("Lisbon, Portugal"));

        let request_line = handle.join().expect("server thread should finish");
        assert!(request_line.starts_with("GET /astronomy?"));
        assert!(request_line.contains("apiKey=test-key"));
        assert!(request_line.contains("location=Lisbon"));
    }

    #[test]
    fn fetch_maps_error_status_to_unavailable() {
        let (endpoint, handle) = serve_once("503 Service Unavailable", "{}");
        let source = HttpSource::from_settings(&settings(endpoint)).expect("source should build");

        let err = source.fetch().unwrap_err();
        assert!(matches!(err, ConspiraError::UpstreamUnavailable(_)));
        assert!(err.to_string().contains("503"));
        handle.join().expect("server thread should finish");
    }

    #[test]
    fn fetch_rejects_non_object_payload() {
        let (endpoint, handle) = serve_once("200 OK", "[1,2,3]");
        let source = HttpSource::from_settings(&settings(endpoint)).expect("source should build");

        assert!(matches!(source.fetch(), Err(ConspiraError::MalformedPayload(_))));
        handle.join().expect("server thread should finish");
    }

    #[test]
    fn missing_credential_is_reported() {
        let mut settings = settings("http://127.0.0.1:9/astronomy".to_string());
        settings.api_key = None;
        settings.api_key_env = "CONSPIRA_TEST_KEY_THAT_IS_NEVER_SET".to_string();

        assert!(matches!(
            HttpSource::from_settings(&settings),
            Err(ConspiraError::MissingCredential(_))
        ));
    }
}
