pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_message_serialize() {
        let s = serde_json::to_value(types::Status { status: "API running" }).unwrap();
        assert_eq!(s, serde_json::json!({"status": "API running"}));

        let m = serde_json::to_value(types::Message::new("Project deleted")).unwrap();
        assert_eq!(m, serde_json::json!({"message": "Project deleted"}));
    }
}
