//! Basic Gemini client usage example

use gemini_client::{GeminiClient, GenerateContentRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = GeminiClient::from_env()?;

    let response = client
        .generate_content(
            "gemini-2.5-flash",
            &GenerateContentRequest::prompt("What is Rust in one sentence?")
                .temperature(0.1)
                .max_output_tokens(100),
        )
        .await?;

    println!("Response: {}", response.first_text().unwrap_or("<empty>"));

    Ok(())
}
