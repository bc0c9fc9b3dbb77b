//! Key resolution helpers / 键解析辅助函数

/// Resolve the storage key for a request path / 解析请求路径对应的存储键
///
/// The dispatcher has already stripped the leading slash; the path is joined
/// to the configured namespace prefix verbatim, with no further validation.
/// 路径不做遍历清理或编码规范化，原样拼接
pub fn resolve_key(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", prefix, path)
    }
}

/// Build the listing prefix for a search query / 构建搜索查询的列举前缀
pub fn listing_prefix(prefix: &str, query: &str) -> String {
    if prefix.is_empty() {
        query.to_string()
    } else {
        format!("{}/{}", prefix, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_key() {
        assert_eq!(resolve_key("", "a/b.txt"), "a/b.txt");
        assert_eq!(resolve_key("pics", "a/b.txt"), "pics/a/b.txt");
        assert_eq!(resolve_key("pics/raw", "b.txt"), "pics/raw/b.txt");
        assert_eq!(resolve_key("", "file with spaces"), "file with spaces");
    }

    #[test]
    fn test_listing_prefix() {
        assert_eq!(listing_prefix("", "a"), "a");
        assert_eq!(listing_prefix("pics", "a"), "pics/a");
        assert_eq!(listing_prefix("pics", ""), "pics/");
    }
}
