//! getgatherの `extract_result.bundles` → `Vec<Book>` 変換。

use serde_json::Value;

use super::error::ShapeError;
use super::model::book::Book;

/// bundles配列を平坦なBook列に変換する。
///
/// `content` が配列でないbundleはエラーにせず丸ごと読み飛ばす。
/// 配列の各要素は必ず1冊のBookになる。
pub fn books_from_bundles(bundles: &Value) -> Result<Vec<Book>, ShapeError> {
    let bundles = bundles.as_array().ok_or_else(|| ShapeError::UnexpectedType {
        path: "bundles".into(),
        expected: "array",
    })?;

    let mut books = Vec::new();
    for (i, bundle) in bundles.iter().enumerate() {
        let path = format!("bundles[{i}]");
        let content = field(bundle, &path, "content")?;
        let Some(entries) = content.as_array() else {
            continue;
        };
        for (j, entry) in entries.iter().enumerate() {
            books.push(book_from_entry(entry, &format!("{path}.content[{j}]"))?);
        }
    }
    Ok(books)
}

fn book_from_entry(entry: &Value, path: &str) -> Result<Book, ShapeError> {
    let cover = verbatim_text(field(entry, path, "cover")?);
    let title = verbatim_text(field(entry, path, "title")?).unwrap_or_else(|| "null".into());
    let author = verbatim_text(field(entry, path, "author")?).unwrap_or_else(|| "null".into());
    let rating = parse_rating(field(entry, path, "rating")?, &format!("{path}.rating"))?;
    Ok(Book::new(cover, title, author, rating))
}

fn field<'a>(value: &'a Value, path: &str, key: &str) -> Result<&'a Value, ShapeError> {
    let object = value.as_object().ok_or_else(|| ShapeError::UnexpectedType {
        path: path.to_string(),
        expected: "object",
    })?;
    object.get(key).ok_or_else(|| ShapeError::MissingField {
        path: format!("{path}.{key}"),
    })
}

/// 文字列はそのまま、nullはNone、それ以外はJSON表記で受け取る。
fn verbatim_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 数値はそのまま、文字列は前後の空白を除いて `f64` として解釈する。
/// 真偽値は 1.0 / 0.0。
fn parse_rating(value: &Value, path: &str) -> Result<f64, ShapeError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.ok_or_else(|| ShapeError::InvalidRating {
        path: path.to_string(),
        value: value.to_string(),
    })
}
