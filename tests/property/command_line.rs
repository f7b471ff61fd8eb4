use proptest::prelude::*;
use procexec::exec::command_line::{combine_arguments, command_line, split_arguments};

// Arguments without quotes, backslashes or non-space whitespace: the subset
// the composition rules promise to preserve. Empty arguments are excluded,
// they vanish from a composed command line.
fn plain_argument() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._/:=-]{1,12}"
}

proptest! {
    #[test]
    fn composed_arguments_split_back_unchanged(
        args in proptest::collection::vec(plain_argument(), 0..8)
    ) {
        let combined = combine_arguments(&args);
        prop_assert_eq!(split_arguments(&combined), args);
    }

    #[test]
    fn command_line_starts_with_program_and_holds_the_arguments(
        program in "[a-z]{1,8}",
        args in proptest::collection::vec(plain_argument(), 0..8)
    ) {
        let line = command_line(&program, &args);
        let mut parts = split_arguments(&line);
        prop_assert_eq!(parts.remove(0), program);
        prop_assert_eq!(parts, args);
    }

    #[test]
    fn splitting_never_panics(line in ".{0,40}") {
        let _ = split_arguments(&line);
    }
}
