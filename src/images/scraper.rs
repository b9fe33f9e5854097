//! Best-effort discovery of image references in rendered chart templates.
//!
//! This is a text scrape, not a Kubernetes-aware scanner. Any token shaped
//! like `registry/repo:tag` is reported, wherever it appears, so images passed
//! through operator args (`- quay.io/foo/bar:v1`) are found alongside
//! `image:` fields. Non-image tokens of the same shape are false positives;
//! deduplication is the only filtering applied here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static IMAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:\s*?\S*?\s*?)([a-zA-Z\-./_\\:'\d]+:[a-zA-Z\-.'\d]+)+(?:\n|\r)*?"#)
        .expect("image pattern is valid")
});

/// Every image-shaped token in `rendered`, in order of appearance.
pub fn extract_image_refs(rendered: &str) -> Vec<String> {
    IMAGE_REGEX
        .captures_iter(rendered)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Drop repeated references, keeping the first occurrence of each.
pub fn dedup_refs(refs: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    refs.into_iter().filter(|r| seen.insert(r.clone())).collect()
}

/// Extract and deduplicate references across several rendered charts.
pub fn scrape_images<'a>(rendered: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    dedup_refs(rendered.into_iter().flat_map(extract_image_refs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RENDERED: &str = r#"---
apiVersion: apps/v1
kind: Deployment
spec:
  template:
    spec:
      containers:
        - name: argoexec
          image: quay.io/argoproj/argoexec:v3.0.0
          args:
            - --executor-image
            - quay.io/argoproj/argoexec:v3.0.0
        - name: dns
          image: "k8s.gcr.io/external-dns/external-dns:v0.10.2"
"#;

    #[test]
    fn test_extracts_image_field() {
        let refs = extract_image_refs("image: quay.io/argoproj/argoexec:v3.0.0\n");
        assert_eq!(refs, vec!["quay.io/argoproj/argoexec:v3.0.0".to_string()]);
    }

    #[test]
    fn test_extracts_list_entries_and_dedups() {
        let refs = scrape_images([RENDERED]);
        assert!(refs.contains(&"quay.io/argoproj/argoexec:v3.0.0".to_string()));
        assert_eq!(
            refs.iter()
                .filter(|r| r.as_str() == "quay.io/argoproj/argoexec:v3.0.0")
                .count(),
            1
        );
    }

    #[test]
    fn test_key_value_pairs_are_not_matched() {
        // `key: value` has whitespace after the colon and is not image-shaped.
        let refs = extract_image_refs("name: argoexec\nkind: Deployment\n");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let refs = dedup_refs(
            ["b:1", "a:1", "b:1", "c:2", "a:1"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(refs, vec!["b:1", "a:1", "c:2"]);
    }

    #[test]
    fn test_dedup_across_charts() {
        let refs = scrape_images(["image: nginx:1.25\n", "image: nginx:1.25\nimage: redis:7.2\n"]);
        assert_eq!(refs, vec!["nginx:1.25", "redis:7.2"]);
    }

    proptest! {
        #[test]
        fn scrape_is_idempotent(text in "[a-z:/. \\n0-9-]{0,200}") {
            let first = scrape_images([text.as_str()]);
            let second = scrape_images([text.as_str()]);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(dedup_refs(first.clone()), first);
        }
    }
}
