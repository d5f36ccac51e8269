//! Property-based tests for destination naming and answer parsing.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::prompt::{parse_yes, NameAnswer};
    use crate::registrar::{default_destination, destination};
    use proptest::prelude::*;

    // ============================================================================
    // default_destination property tests
    // ============================================================================

    proptest! {
        /// Property: the default name never contains a separator or a dot
        #[test]
        fn default_destination_is_a_single_segment(url in ".*") {
            let name = default_destination(&url);
            prop_assert!(!name.contains('/'), "'{}' from '{}'", name, url);
            prop_assert!(!name.contains(':'), "'{}' from '{}'", name, url);
            prop_assert!(!name.contains('.'), "'{}' from '{}'", name, url);
        }

        /// Property: https URLs yield the repository name without suffix
        #[test]
        fn default_destination_of_https_url(
            host in "[a-z]{1,10}\\.[a-z]{2,3}",
            group in "[a-z0-9_-]{1,10}",
            repo in "[a-z0-9_-]{1,12}",
            suffix in "(\\.git)?/?",
        ) {
            let url = format!("https://{}/{}/{}{}", host, group, repo, suffix);
            prop_assert_eq!(default_destination(&url), repo);
        }

        /// Property: scp-like URLs yield the same name as their https form
        #[test]
        fn default_destination_scp_matches_https(
            group in "[a-z0-9_-]{1,10}",
            repo in "[a-z0-9_-]{1,12}",
        ) {
            let https = format!("https://example.com/{}/{}.git", group, repo);
            let scp = format!("git@example.com:{}/{}.git", group, repo);
            prop_assert_eq!(default_destination(&https), default_destination(&scp));
        }

        /// Property: archiving only ever adds the archive prefix
        #[test]
        fn destination_archive_prefix(
            name in "[a-z0-9_-]{1,12}",
            archive in "[a-z]{1,8}",
        ) {
            prop_assert_eq!(destination(&name, false, &archive), name.clone());
            prop_assert_eq!(
                destination(&name, true, &archive),
                format!("{}/{}", archive, name)
            );
        }
    }

    // ============================================================================
    // NameAnswer::parse property tests
    // ============================================================================

    proptest! {
        /// Property: whitespace-only input keeps the default
        #[test]
        fn blank_answer_keeps_default(input in "[ \\t\\r\\n]*") {
            prop_assert_eq!(NameAnswer::parse(&input, "c"), NameAnswer::Default);
        }

        /// Property: any other answer is the trimmed input, unless it is the token
        #[test]
        fn answer_is_trimmed_rename(
            name in "[a-zA-Z0-9_/-]{2,20}",
            pad in "[ \\t]{0,3}",
        ) {
            let input = format!("{}{}{}\n", pad, name, pad);
            prop_assert_eq!(NameAnswer::parse(&input, "c"), NameAnswer::Rename(name));
        }

        /// Property: the cancel token cancels whatever it is
        #[test]
        fn cancel_token_always_cancels(token in "[a-zA-Z0-9]{1,8}") {
            prop_assert_eq!(NameAnswer::parse(&token, &token), NameAnswer::Cancel);
        }

        /// Property: only y/yes in any case confirm
        #[test]
        fn parse_yes_accepts_only_yes(input in "[a-zA-Z]{0,5}") {
            let expected = matches!(input.to_lowercase().as_str(), "y" | "yes");
            prop_assert_eq!(parse_yes(&input), expected);
        }
    }
}
