//! Texts the extraction actor answers with.

use protocol::Category;

pub const EXTRACTION_SUCCEEDED: &str =
    "Done! I processed the article. Ask me about what it mentions with /get <category>.";
pub const EXTRACTION_FAILED: &str = "Sorry, I could not extract anything from that article.";
pub const INTERNAL_ERROR: &str = "Something went wrong on my side while processing the article.";
pub const NOT_PROCESSED: &str = "No article has been processed yet. Send one with /extract first.";
pub const NOTHING_FOUND: &str = "I found nothing for that category in the last article.";
pub const MALFORMED_REQUEST: &str = "Sorry, I could not read that request.";

pub fn listing(category: Category, values: &[&str]) -> String {
    format!(
        "Here are the {} I found:\n{}",
        category.display_name(),
        values.join("\n")
    )
}
