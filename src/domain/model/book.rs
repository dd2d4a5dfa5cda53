use serde::Serialize;

/// 本棚上の1冊。translatorだけが生成する。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    title: String,
    author: String,
    rating: f64,
    /// 表紙の無い本はnull
    cover: Option<String>,
}

impl Book {
    pub fn new(
        cover: Option<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            rating,
            cover,
        }
    }

    pub fn cover(&self) -> Option<&str> {
        self.cover.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }
}

/// 認証成功時の結果。booksはサービスの応答順を保持する（重複も残す）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthResponse {
    profile_id: String,
    books: Vec<Book>,
}

impl AuthResponse {
    pub fn new(profile_id: impl Into<String>, books: Vec<Book>) -> Self {
        Self {
            profile_id: profile_id.into(),
            books,
        }
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}
