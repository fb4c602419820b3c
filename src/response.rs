/// Mutable view of an outgoing response the engine writes CORS headers onto.
pub trait CorsResponse {
    /// Replaces every existing value of `name`.
    fn set_header(&mut self, name: &str, value: &str);

    /// Appends a value, keeping the existing ones.
    fn add_header(&mut self, name: &str, value: &str);

    fn remove_header(&mut self, name: &str);

    fn set_status(&mut self, status: u16, reason: &str);
}
