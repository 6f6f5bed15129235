#[cfg(test)]
mod tests {
    use crate::grader::{extract_score, score_or_default};

    #[test]
    fn test_extract_score_from_heading() {
        let text = r#"
        ## Correctness
        Handles all cases.

        ### Score: 8/10
        Solid solution.
        "#;
        assert_eq!(extract_score(text), Some(8.0));
    }

    #[test]
    fn test_extract_score_case_and_spacing() {
        assert_eq!(extract_score("score:7 / 10"), Some(7.0));
        assert_eq!(extract_score("SCORE:   3/10"), Some(3.0));
    }

    #[test]
    fn test_extract_score_with_markdown_bold() {
        assert_eq!(extract_score("**Score:** 9/10"), Some(9.0));
    }

    #[test]
    fn test_extract_score_decimal() {
        assert_eq!(extract_score("Score: 6.5/10"), Some(6.5));
    }

    #[test]
    fn test_extract_score_takes_first_match() {
        assert_eq!(extract_score("Score: 4/10 ... revised Score: 9/10"), Some(4.0));
    }

    #[test]
    fn test_extract_score_clamps_overflow() {
        assert_eq!(extract_score("Score: 12/10"), Some(10.0));
    }

    #[test]
    fn test_extract_score_rejects_other_scales() {
        assert_eq!(extract_score("Score: 80/100"), None);
        assert_eq!(extract_score("Rating: 8/10"), None);
        assert_eq!(extract_score(""), None);
    }

    #[test]
    fn test_score_or_default_fallback() {
        assert_eq!(score_or_default("Great job overall!", 5.0), 5.0);
        assert_eq!(score_or_default("Score: 2/10", 5.0), 2.0);
    }
}
