use std::fs;

use msh_core::Context;
use msh_exec::Executor;

/// Counts the pipes that are open in the current process.
fn open_pipes() -> usize {
    fs::read_dir("/proc/self/fd")
        .expect("list open file descriptors")
        .filter_map(Result::ok)
        .filter_map(|entry| fs::read_link(entry.path()).ok())
        .filter(|target| target.to_string_lossy().starts_with("pipe:"))
        .count()
}

#[test]
fn pipelines_leave_no_pipes_open() {
    let executor = Executor::default();
    let mut context = Context::default();
    let pipeline = msh_parse::parse("printf abc | cat | cat | wc -c > /dev/null");

    // The first pipeline also starts the reaper, which owns a pipe of its own.
    executor.execute(&pipeline, &mut context).unwrap();
    let before = open_pipes();

    for _ in 0..5 {
        assert_eq!(executor.execute(&pipeline, &mut context).unwrap(), 0);
    }
    let background = msh_parse::parse("true | true &");
    executor.execute(&background, &mut context).unwrap();

    assert_eq!(open_pipes(), before);
}
