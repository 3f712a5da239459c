use std::time::Duration;

use skhema::application::services::review_system_prompt;
use skhema::domain::{Prompt, SchematicImage};
use skhema::infrastructure::llm::DeepSeekClient;

fn test_client() -> DeepSeekClient {
    DeepSeekClient::new(
        "test-key".to_string(),
        "https://api.deepseek.com/v1",
        "deepseek-chat".to_string(),
        500,
        review_system_prompt(500),
        Duration::from_secs(30),
    )
}

fn assert_close(value: &serde_json::Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn given_text_prompt_when_building_request_then_sampling_is_fixed() {
    let client = test_client();
    let prompt = Prompt::new("R1 1 2 1k").unwrap();

    let value = serde_json::to_value(client.build_request(&prompt, None)).unwrap();

    assert_eq!(value["model"], "deepseek-chat");
    assert_eq!(value["max_tokens"], 500);
    assert_eq!(value["stream"], false);
    assert_close(&value["temperature"], 0.7);
    assert_close(&value["top_p"], 0.95);
    assert_close(&value["frequency_penalty"], 0.0);
    assert_close(&value["presence_penalty"], 0.0);
}

#[test]
fn given_text_prompt_when_building_request_then_content_is_plain_string() {
    let client = test_client();
    let prompt = Prompt::new("R1 1 2 1k").unwrap();

    let value = serde_json::to_value(client.build_request(&prompt, None)).unwrap();
    let messages = value["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(
        messages[0]["content"]
            .as_str()
            .unwrap()
            .contains("инженер-электронщик")
    );
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "R1 1 2 1k");
}

#[test]
fn given_image_when_building_request_then_content_is_two_typed_parts() {
    let client = test_client();
    let prompt = Prompt::new("Что изображено на фото?").unwrap();
    let image = SchematicImage::from_bytes(b"png-bytes");

    let value = serde_json::to_value(client.build_request(&prompt, Some(&image))).unwrap();
    let content = value["messages"][1]["content"].as_array().unwrap();

    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["type"], "text");
    assert_eq!(content[0]["text"], "Что изображено на фото?");
    assert_eq!(content[1]["type"], "image_url");
    let url = content[1]["image_url"]["url"].as_str().unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
    assert_eq!(content[1]["image_url"]["detail"], "high");
}

#[test]
fn given_token_budget_when_building_system_prompt_then_budget_is_in_text() {
    let prompt = review_system_prompt(500);

    assert!(prompt.contains("Максимум 3 ошибки"));
    assert!(prompt.contains("не должен превышать 500 токенов"));
    assert!(prompt.ends_with("Отвечай строго на русском языке."));
}
