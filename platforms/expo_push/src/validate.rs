use crate::token::is_valid_token;
use crate::{PushMessage, ValidationError};

/// Check a batch before it is sent.
///
/// Returns the number of (message, recipient) pairs, which is how many tickets
/// the service must answer with. Empty recipient lists are reported before
/// malformed tokens, so a message with no recipients is always caught.
pub fn validate(messages: &[PushMessage]) -> Result<usize, ValidationError> {
    if let Some(index) = messages.iter().position(|message| message.to.is_empty()) {
        return Err(ValidationError::NoRecipients { index });
    }

    let mut count = 0;
    for message in messages {
        if let Some(token) = message.to.iter().find(|token| !is_valid_token(token)) {
            return Err(ValidationError::MalformedToken {
                token: token.clone(),
            });
        }
        count += message.to.len();
    }
    Ok(count)
}
