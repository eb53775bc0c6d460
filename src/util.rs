//! 小物ユーティリティ

/// ツイート本文は `&amp;` `&lt;` `&gt;` がエスケープされて届くので戻す
pub fn unescape_entities(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// ログ出力用に改行をつぶして 1 行にする
pub fn single_line(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
