use crate::article::Article;

/// Ranks articles by likes, most liked first, and keeps the top `n`
///
/// The order of articles with equal likes is unspecified.
///
/// # Example
///
/// ```
/// use newsrank::{rank_top, Article};
///
/// let ranked = rank_top(
///     vec![
///         Article::new("https://vnexpress.net/a.html", "a", None, 3),
///         Article::new("https://vnexpress.net/b.html", "b", None, 9),
///     ],
///     1,
/// );
/// assert_eq!(ranked[0].likes, 9);
/// assert_eq!(ranked.len(), 1);
/// ```
pub fn rank_top(mut articles: Vec<Article>, n: usize) -> Vec<Article> {
    articles.sort_unstable_by(|a, b| b.likes.cmp(&a.likes));
    articles.truncate(n);
    articles
}
