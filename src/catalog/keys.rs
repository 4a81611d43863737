//! Cache key construction for catalog entries.
//!
//! Single items live under `product:{id}`; listing pages live under the
//! `products:list:` namespace so they can be evicted with one prefix delete.
//! Neither prefix is a prefix of the other.

use crate::catalog::model::ListingQuery;

/// Namespace shared by every listing key.
pub const LISTING_NAMESPACE: &str = "products:list:";

const SINGLE_ITEM_PREFIX: &str = "product:";

/// Key for one product by id.
pub fn single_item_key(id: i64) -> String {
    format!("{}{}", SINGLE_ITEM_PREFIX, id)
}

/// Key for one page of a filtered listing.
///
/// The keyword is prefixed with its byte length, so keywords containing the
/// `:` separator cannot be confused with the numeric fields that follow.
/// An absent keyword equals the empty keyword; an absent or negative
/// category equals the `0` "no filter" sentinel.
pub fn listing_key(keyword: Option<&str>, category_id: Option<i64>, page: u32, limit: u32) -> String {
    let keyword = keyword.unwrap_or("");
    let category = category_id.unwrap_or(0).max(0);
    format!(
        "{}{}:{}:{}:{}:{}",
        LISTING_NAMESPACE,
        keyword.len(),
        keyword,
        category,
        page,
        limit
    )
}

/// Key for a listing query.
pub fn listing_key_for(query: &ListingQuery) -> String {
    listing_key(query.keyword.as_deref(), query.category_id, query.page, query.limit)
}
