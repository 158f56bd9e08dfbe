//! "Did you mean" hints for unknown names

/// Closest candidate within a small edit distance of `name`
pub fn closest<'name>(name: &str, candidates: impl IntoIterator<Item = &'name str>) -> Option<String> {
    candidates
        .into_iter()
        .filter(|candidate| *candidate != name)
        .map(|candidate| (candidate, edit_distance(name, candidate)))
        .filter(|(_, distance)| *distance <= max_distance(name))
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate.to_owned())
}

/// Short names only tolerate a single edit
fn max_distance(name: &str) -> usize {
    if name.chars().count() <= 3 { 1 } else { 2 }
}

/// Levenshtein distance over chars
fn edit_distance(source: &str, target: &str) -> usize {
    let target: Vec<char> = target.chars().collect();
    let mut previous: Vec<usize> = (0..=target.len()).collect();

    for (idx, source_char) in source.chars().enumerate() {
        let mut current = Vec::with_capacity(previous.len());
        current.push(idx + 1);
        for (jdx, target_char) in target.iter().enumerate() {
            let cost = usize::from(source_char != *target_char);
            let best = (previous[jdx + 1] + 1)
                .min(current[jdx] + 1)
                .min(previous[jdx] + cost);
            current.push(best);
        }
        previous = current;
    }

    previous[target.len()]
}
