/// Lower-cases, sorts and deduplicates a word or path list.
pub fn normalize(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = list.into_iter().map(|s| s.to_lowercase()).collect();
    out.sort();
    out.dedup();
    out
}
