//! Query building blocks shared by the SeaORM repositories: case-insensitive
//! text matching, sort resolution and page fetching.

use common::types::{Page, PageRequest, SortOrder};
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, IntoSimpleExpr, Order, PaginatorTrait, Select};

use crate::errors::ServiceError;

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn lower<C: ColumnTrait>(col: C) -> Expr {
    Expr::expr(Func::lower(col.into_simple_expr()))
}

/// `LOWER(col) LIKE '%needle%'`
///
/// The needle is lowered with full Unicode rules. SQLite's `LOWER()` only
/// folds ASCII, so non-ASCII letters match case-insensitively on Postgres only.
pub fn icontains<C: ColumnTrait>(col: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    lower(col).like(LikeExpr::new(pattern).escape('\\'))
}

/// `LOWER(col) = lower(value)`
pub fn ieq<C: ColumnTrait>(col: C, value: &str) -> SimpleExpr {
    lower(col).eq(value.to_lowercase())
}

/// `LOWER(col) LIKE '%suffix'`
pub fn iends_with<C: ColumnTrait>(col: C, suffix: &str) -> SimpleExpr {
    let pattern = format!("%{}", escape_like(&suffix.to_lowercase()));
    lower(col).like(LikeExpr::new(pattern).escape('\\'))
}

/// Lower-case with separators removed, so `PhoneNumber`, `phone_number`
/// and `phone-number` name the same field.
pub fn sort_key(raw: &str) -> String {
    raw.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

pub fn to_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

/// Pick the sort column. No field means the primary key in the requested
/// direction; an unknown field falls back to the primary key ascending.
pub fn resolve_sort<C: Copy>(
    sort_by: Option<&str>,
    sort_order: Option<SortOrder>,
    pk: C,
    lookup: impl Fn(&str) -> Option<C>,
) -> (C, Order) {
    let dir = to_order(sort_order.unwrap_or_default());
    match sort_by {
        None => (pk, dir),
        Some(raw) => match lookup(&sort_key(raw)) {
            Some(col) => (col, dir),
            None => (pk, Order::Asc),
        },
    }
}

/// Count all matches, then fetch the requested page.
pub async fn fetch_page<E>(
    select: Select<E>,
    db: &DatabaseConnection,
    req: PageRequest,
) -> Result<Page<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let paginator = select.paginate(db, req.page_size);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(req.index()).await?;
    Ok(Page::new(items, total, req))
}

/// Slice an already filtered and sorted list; used by the in-memory mocks.
pub fn page_of<T>(items: Vec<T>, req: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let skip = usize::try_from(req.offset()).unwrap_or(usize::MAX);
    let items = items.into_iter().skip(skip).take(req.page_size as usize).collect();
    Page::new(items, total, req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Col {
        Id,
        Name,
        PhoneNumber,
    }

    fn lookup(key: &str) -> Option<Col> {
        match key {
            "id" => Some(Col::Id),
            "name" => Some(Col::Name),
            "phonenumber" => Some(Col::PhoneNumber),
            _ => None,
        }
    }

    #[test]
    fn sort_key_ignores_case_and_separators() {
        assert_eq!(sort_key("PhoneNumber"), "phonenumber");
        assert_eq!(sort_key("phone_number"), "phonenumber");
        assert_eq!(sort_key(" Start-Time "), "starttime");
    }

    #[test]
    fn known_field_keeps_direction() {
        let (col, ord) = resolve_sort(Some("phone_number"), Some(SortOrder::Desc), Col::Id, lookup);
        assert_eq!(col, Col::PhoneNumber);
        assert!(matches!(ord, Order::Desc));
    }

    #[test]
    fn unknown_field_falls_back_to_key_ascending() {
        let (col, ord) = resolve_sort(Some("salary"), Some(SortOrder::Desc), Col::Id, lookup);
        assert_eq!(col, Col::Id);
        assert!(matches!(ord, Order::Asc));
    }

    #[test]
    fn missing_field_sorts_by_key() {
        let (col, ord) = resolve_sort(None, None, Col::Id, lookup);
        assert_eq!(col, Col::Id);
        assert!(matches!(ord, Order::Asc));
        let (_, ord) = resolve_sort(None, Some(SortOrder::Desc), Col::Id, lookup);
        assert!(matches!(ord, Order::Desc));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn needle_is_lowered_before_matching() {
        use models::worker;
        use sea_orm::sea_query::{Query, SqliteQueryBuilder};

        let sql = Query::select()
            .column(worker::Column::Name)
            .from(worker::Entity)
            .and_where(icontains(worker::Column::Name, "ÉMILE"))
            .to_string(SqliteQueryBuilder);
        assert!(sql.contains("LOWER("), "{sql}");
        assert!(sql.contains("LIKE '%émile%'"), "{sql}");
    }

    #[test]
    fn page_of_slices_and_counts() {
        let page = page_of((1..=25).collect::<Vec<_>>(), PageRequest::new(Some(3), Some(10)));
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages(), 3);
        let empty = page_of((1..=5).collect::<Vec<_>>(), PageRequest::new(Some(9), Some(10)));
        assert!(empty.items.is_empty());
        assert_eq!(empty.total_count, 5);
    }

    #[test]
    fn page_of_far_past_the_end_is_empty() {
        let page = page_of((1..=5).collect::<Vec<_>>(), PageRequest::new(Some(u64::MAX), Some(100)));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
    }
}
