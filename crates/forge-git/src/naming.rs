//! Update branch naming

use crate::{Error, Result};

/// Prefix of every branch the pipeline creates.
pub const BRANCH_PREFIX: &str = "ai-update-";

/// Branch name for a given process id: `ai-update-<pid>`.
pub fn branch_name_for_pid(pid: u32) -> String {
    format!("{BRANCH_PREFIX}{pid}")
}

/// Branch name for the running process.
pub fn current_branch_name() -> String {
    branch_name_for_pid(std::process::id())
}

/// Reject names git would refuse as a local branch.
pub(crate) fn validate_branch_name(name: &str) -> Result<()> {
    if git2::Reference::is_valid_name(&format!("refs/heads/{name}")) {
        Ok(())
    } else {
        Err(Error::InvalidBranchName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "ai-update-0")]
    #[case(4242, "ai-update-4242")]
    #[case(u32::MAX, "ai-update-4294967295")]
    fn test_branch_name_for_pid(#[case] pid: u32, #[case] expected: &str) {
        assert_eq!(branch_name_for_pid(pid), expected);
    }

    #[test]
    fn test_current_branch_name_is_stable() {
        assert_eq!(current_branch_name(), current_branch_name());
        assert_eq!(
            current_branch_name(),
            format!("ai-update-{}", std::process::id())
        );
    }

    #[rstest]
    #[case("ai-update-1", true)]
    #[case("feature/x", true)]
    #[case("bad..name", false)]
    #[case("with space", false)]
    fn test_validate_branch_name(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(validate_branch_name(name).is_ok(), valid);
    }
}
