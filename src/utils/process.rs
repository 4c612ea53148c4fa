use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};

/// Spawns `program` with `args`, detached from this process and with no
/// standard streams attached. The child is not waited on.
pub fn spawn_detached<I, S>(program: &str, args: I) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = detached_command(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let child = cmd.spawn()?;
    tracing::debug!(pid = child.id(), program, "spawned detached process");
    drop(child);
    Ok(())
}

#[cfg(windows)]
fn detached_command(program: &str) -> Command {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

    let mut cmd = Command::new(program);
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    cmd
}

#[cfg(unix)]
fn detached_command(program: &str) -> Command {
    use std::os::unix::process::CommandExt;

    let mut cmd = Command::new(program);
    // Own process group, so terminal signals aimed at us skip the child.
    cmd.process_group(0);
    cmd
}

#[cfg(not(any(unix, windows)))]
fn detached_command(program: &str) -> Command {
    Command::new(program)
}
