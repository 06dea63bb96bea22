/// Delivery of the provisioning callback body to the event's response URL.
pub trait ResponseSender {
    fn send_response(&self, url: &str, body: &[u8]) -> Result<(), String>;
}
