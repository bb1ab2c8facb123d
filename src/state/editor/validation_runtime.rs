use super::EditorState;

impl EditorState {
    /// Optional fields are always valid; required ones need a point.
    pub fn is_valid(&self) -> bool {
        !self.config.required || self.value.is_valid()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.config.required_message.clone())
        }
    }
}
