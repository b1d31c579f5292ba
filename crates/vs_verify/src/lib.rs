//! Checks a pair of live variant instances against locally computed digests.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use vs_core::{Error, LabelHasher, Result, Sha256Hasher, Variant};

pub const DEFAULT_INFERENCE_URL: &str = "http://localhost:5001";
pub const DEFAULT_TRAINING_URL: &str = "http://localhost:5002";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URLs of the two running instances.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub inference: Url,
    pub training: Url,
}

impl Endpoints {
    pub fn parse(inference: &str, training: &str) -> Result<Self> {
        Ok(Self {
            inference: Url::parse(inference)?,
            training: Url::parse(training)?,
        })
    }

    fn base(&self, variant: Variant) -> &Url {
        match variant {
            Variant::Inference => &self.inference,
            Variant::Training => &self.training,
        }
    }

    /// Appends the variant's segment to the base, keeping any path prefix.
    pub fn url_for(&self, variant: Variant) -> Result<Url> {
        let mut base = self.base(variant).clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(variant.label())?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub variant: Variant,
    pub endpoint: String,
    pub http_status: u16,
    pub actual_digest: String,
    pub expected_digest: String,
    pub passed: bool,
}

/// Results in (inference, training) order.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub results: Vec<VerificationResult>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn get(&self, variant: Variant) -> Option<&VerificationResult> {
        self.results.iter().find(|r| r.variant == variant)
    }

    /// Fails on the first failing endpoint, naming the variant and either the
    /// status code or the digest mismatch.
    pub fn ensure_passed(&self) -> Result<()> {
        match self.results.iter().find(|r| !r.passed) {
            None => Ok(()),
            Some(r) if r.http_status != StatusCode::OK.as_u16() => Err(Error::UnexpectedStatus {
                variant: r.variant,
                status: r.http_status,
            }),
            Some(r) => Err(Error::DigestMismatch {
                variant: r.variant,
                expected: r.expected_digest.clone(),
                actual: r.actual_digest.clone(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResultBody {
    result: String,
}

pub struct Verifier {
    client: Client,
    hasher: Arc<dyn LabelHasher>,
}

impl Verifier {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_hasher(timeout, Arc::new(Sha256Hasher))
    }

    pub fn with_hasher(timeout: Duration, hasher: Arc<dyn LabelHasher>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, hasher })
    }

    /// Queries both variants concurrently and waits for both before judging.
    /// Transport failures abort the run; bad statuses and digests are recorded.
    pub async fn verify(&self, endpoints: &Endpoints) -> Result<VerificationReport> {
        let (inference, training) = tokio::join!(
            self.check(endpoints, Variant::Inference),
            self.check(endpoints, Variant::Training),
        );

        Ok(VerificationReport {
            results: vec![inference?, training?],
        })
    }

    async fn check(&self, endpoints: &Endpoints, variant: Variant) -> Result<VerificationResult> {
        let url = endpoints.url_for(variant)?;
        debug!("Requesting {} endpoint {}", variant, url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let expected_digest = self.hasher.digest(variant.label());

        if status != StatusCode::OK {
            warn!("{} endpoint {} answered {}", variant, url, status);
            return Ok(VerificationResult {
                variant,
                endpoint: url.to_string(),
                http_status: status.as_u16(),
                actual_digest: String::new(),
                expected_digest,
                passed: false,
            });
        }

        let body: ResultBody = response.json().await?;
        let passed = body.result == expected_digest;
        if passed {
            info!("✅ {} digest matches", variant);
        } else {
            warn!("❌ {} digest mismatch: expected {}, got {}", variant, expected_digest, body.result);
        }

        Ok(VerificationResult {
            variant,
            endpoint: url.to_string(),
            http_status: status.as_u16(),
            actual_digest: body.result,
            expected_digest,
            passed,
        })
    }
}
