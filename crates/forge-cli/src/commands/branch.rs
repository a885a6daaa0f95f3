//! The `branch-name` command

use forge_git::{branch_name_for_pid, current_branch_name};

use crate::error::Result;

pub fn run_branch_name(pid: Option<u32>) -> Result<()> {
    let name = match pid {
        Some(pid) => branch_name_for_pid(pid),
        None => current_branch_name(),
    };
    println!("{name}");
    Ok(())
}
