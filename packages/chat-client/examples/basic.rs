//! Basic chat client usage example

use chat_client::{ChatClient, ChatRequest, Message};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads GROQ_API_KEY (and optionally GROQ_BASE_URL)
    let client = ChatClient::from_env()?;

    let request = ChatRequest::new("llama3-70b-8192")
        .message(Message::system("You are an assistant that extracts specific information."))
        .message(Message::user(
            "Get me the email of OpenAI using the following search results:\n\n\
             Contact email: info@openai.com.",
        ))
        .temperature(0.0)
        .max_tokens(64)
        .top_p(1.0);

    let response = client.chat_completion(&request).await?;

    match response.first_content() {
        Some(content) => println!("Response: {}", content),
        None => println!("No content returned"),
    }

    Ok(())
}
