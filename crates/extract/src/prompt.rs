use protocol::Category;

pub fn build_annotation_prompt(article: &str) -> String {
    let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();

    format!(
        r#"Find the named entities in the following news article.

INSTRUCTIONS:
1. Only report entities of these categories: {}
2. Copy each entity exactly as it appears in the text
3. Output ONLY valid JSON, nothing else

SCHEMA:
{{
  "annotations": [
    {{"category": "PERSON", "value": "Barack Obama"}}
  ]
}}

RULES:
- One object per mention; repeating a value is fine
- Dates, amounts of money and percentages keep their original wording
- Output ONLY the JSON object, no markdown, no explanations

ARTICLE:
{}

JSON OUTPUT:"#,
        labels.join(", "),
        article
    )
}
