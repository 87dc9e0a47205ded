/// Lay items out in rows of `columns`, left to right and top to bottom.
///
/// Order is preserved; only the last row may be short. A column count of
/// zero is treated as one.
pub fn layout<T>(items: Vec<T>, columns: usize) -> Vec<Vec<T>> {
    let columns = columns.max(1);
    let mut rows = Vec::with_capacity(items.len().div_ceil(columns));
    let mut current = Vec::with_capacity(columns);
    for item in items {
        current.push(item);
        if current.len() == columns {
            rows.push(std::mem::replace(&mut current, Vec::with_capacity(columns)));
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
