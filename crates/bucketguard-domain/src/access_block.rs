use crate::model::PublicAccessBlockInput;
use bucketguard_types::AccessBlockSummary;

pub fn summarize_access_block(input: &PublicAccessBlockInput) -> AccessBlockSummary {
    match input {
        PublicAccessBlockInput::Configured(flags) => AccessBlockSummary::Set {
            fully_blocked: flags.fully_blocked(),
            flags: flags.clone(),
        },
        PublicAccessBlockInput::NotConfigured => AccessBlockSummary::NotSet,
        PublicAccessBlockInput::Unavailable(message) => AccessBlockSummary::Unavailable {
            message: message.clone(),
        },
    }
}
