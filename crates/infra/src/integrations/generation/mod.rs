/// Caption generation service integration
///
/// HTTP client for the remote service that writes, optimizes and repurposes
/// captions. It implements the core `CaptionGenerator` port.
///
/// # Architecture
///
/// - **Client**: `GenerationClient` - calls `POST {base}/generateCaption`,
///   `/optimizeCaption` and `/repurposeContent`
/// - **Types**: response envelopes and candidate shapes the service is known
///   to return, normalized at this boundary
/// - **Error Handling**: `GenerationError`, folded into `PostdeckError` when
///   crossing the port
///
/// # Usage
///
/// ```no_run
/// use postdeck_domain::CaptionRequest;
/// use postdeck_infra::http::HttpClient;
/// use postdeck_infra::integrations::generation::GenerationClient;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GenerationClient::new(HttpClient::new()?, "https://gen.example.com/api");
///
/// let request = CaptionRequest {
///     media_url: None,
///     goal: "engagement".to_string(),
///     tone: "playful".to_string(),
///     prompt_text: Some("Spring collection drop".to_string()),
///     platforms: vec!["Instagram".to_string()],
/// };
/// let captions = client.generate(&request).await?;
/// println!("{} suggestions", captions.len());
/// # Ok(())
/// # }
/// ```
///
/// # Error Handling
///
/// - **Network errors, 5xx and 429**: retried by `HttpClient`, then surfaced
///   as retryable `PostdeckError::Network`
/// - **401/403**: `PostdeckError::Auth`
/// - **Other 4xx**: `PostdeckError::InvalidInput`
/// - **Undecodable body**: `PostdeckError::Internal`
pub mod client;
pub mod types;

pub use client::GenerationClient;
pub use types::GenerationError;
