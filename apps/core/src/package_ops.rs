use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::desktop_entry::{clean_exec, DesktopEntry, DesktopEntryError};

const TERMINALS: [&str; 6] = [
    "x-terminal-emulator",
    "lxterminal",
    "xterm",
    "mate-terminal",
    "konsole",
    "terminator",
];

#[derive(Debug)]
pub enum PackageOpsError {
    Descriptor(DesktopEntryError),
    NoExecCommand(PathBuf),
    NoPackageManager,
    OwnerNotFound(String),
    NoAuthMethod,
    CommandFailed { command: String, detail: String },
    Io(std::io::Error),
}

impl Display for PackageOpsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Descriptor(error) => write!(f, "descriptor error: {error}"),
            Self::NoExecCommand(path) => {
                write!(f, "no launch command in {}", path.display())
            }
            Self::NoPackageManager => {
                write!(f, "no compatible package manager detected (dpkg or pacman)")
            }
            Self::OwnerNotFound(program) => {
                write!(f, "could not determine which package owns '{program}'")
            }
            Self::NoAuthMethod => {
                write!(f, "no authentication method available (pkexec, sudo -A, terminal)")
            }
            Self::CommandFailed { command, detail } => {
                write!(f, "'{command}' failed: {detail}")
            }
            Self::Io(error) => write!(f, "process error: {error}"),
        }
    }
}

impl std::error::Error for PackageOpsError {}

impl From<DesktopEntryError> for PackageOpsError {
    fn from(value: DesktopEntryError) -> Self {
        Self::Descriptor(value)
    }
}

impl From<std::io::Error> for PackageOpsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Shells out on behalf of the package operations. Injected so tests
/// never spawn real processes.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, PackageOpsError>;
}

/// Runs the command synchronously with `LANG=C` so the query output
/// parsers see untranslated text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, PackageOpsError> {
        let output = Command::new(program).args(args).env("LANG", "C").output()?;
        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pacman,
    Dpkg,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    Pkexec,
    SudoAskpass,
    Terminal(String),
}

pub fn find_program_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

pub fn detect_package_manager() -> Option<PackageManager> {
    if find_program_in_path("pacman").is_some() {
        return Some(PackageManager::Pacman);
    }
    if find_program_in_path("dpkg").is_some() {
        return Some(PackageManager::Dpkg);
    }
    None
}

/// Picks the first available way to run the removal with elevated
/// rights: pkexec, `sudo -A` when an askpass helper is configured, or a
/// terminal emulator running plain sudo.
pub fn detect_auth_method() -> Option<AuthMethod> {
    if find_program_in_path("pkexec").is_some() {
        return Some(AuthMethod::Pkexec);
    }
    if std::env::var("SUDO_ASKPASS").map(|v| !v.is_empty()).unwrap_or(false) {
        return Some(AuthMethod::SudoAskpass);
    }
    TERMINALS
        .iter()
        .find(|terminal| find_program_in_path(terminal).is_some())
        .map(|terminal| AuthMethod::Terminal(terminal.to_string()))
}

/// First word of a cleaned Exec command, resolved against `$PATH` when
/// it is not already absolute. Falls back to the raw word so the owner
/// query still gets a chance to match.
pub fn resolve_program_path(command: &str) -> String {
    let word = command.split_whitespace().next().unwrap_or(command);
    if Path::new(word).is_absolute() {
        return word.to_string();
    }
    find_program_in_path(word)
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| word.to_string())
}

fn owner_query(manager: PackageManager, program_path: &str) -> (&'static str, Vec<String>) {
    match manager {
        PackageManager::Pacman => ("pacman", vec!["-Qo".to_string(), program_path.to_string()]),
        PackageManager::Dpkg => ("dpkg", vec!["-S".to_string(), program_path.to_string()]),
    }
}

/// Extracts the owning package name from the query output.
///
/// dpkg prints `package: /path`, pacman prints
/// `/path is owned by package version`.
pub fn parse_owner(manager: PackageManager, output: &str) -> Option<String> {
    match manager {
        PackageManager::Dpkg => {
            let first_line = output.lines().next()?;
            let (package, _) = first_line.split_once(':')?;
            let package = package.trim();
            (!package.is_empty()).then(|| package.to_string())
        }
        PackageManager::Pacman => {
            let marker = "owned by ";
            let position = output.find(marker)?;
            let rest = &output[position + marker.len()..];
            let package = rest.split_whitespace().next()?.trim();
            (!package.is_empty()).then(|| package.to_string())
        }
    }
}

/// The unelevated removal invocation for `package`.
pub fn removal_invocation(manager: PackageManager, package: &str) -> Vec<String> {
    match manager {
        PackageManager::Pacman => vec![
            "pacman".to_string(),
            "-R".to_string(),
            "--noconfirm".to_string(),
            package.to_string(),
        ],
        PackageManager::Dpkg => vec![
            "apt".to_string(),
            "remove".to_string(),
            "-y".to_string(),
            package.to_string(),
        ],
    }
}

/// Wraps the removal invocation in the chosen authentication method.
pub fn wrap_with_auth(method: &AuthMethod, removal: &[String]) -> Vec<String> {
    match method {
        AuthMethod::Pkexec => {
            let mut command = vec!["pkexec".to_string()];
            command.extend(removal.iter().cloned());
            command
        }
        AuthMethod::SudoAskpass => {
            let mut command = vec!["sudo".to_string(), "-A".to_string()];
            command.extend(removal.iter().cloned());
            command
        }
        AuthMethod::Terminal(terminal) => vec![
            terminal.clone(),
            "-e".to_string(),
            format!("sudo {}", removal.join(" ")),
        ],
    }
}

pub fn query_owning_package(
    runner: &dyn CommandRunner,
    manager: PackageManager,
    program_path: &str,
) -> Result<String, PackageOpsError> {
    let (program, args) = owner_query(manager, program_path);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = runner.run(program, &arg_refs)?;
    if !output.success() {
        return Err(PackageOpsError::OwnerNotFound(program_path.to_string()));
    }
    parse_owner(manager, &output.stdout)
        .ok_or_else(|| PackageOpsError::OwnerNotFound(program_path.to_string()))
}

pub fn remove_owned_package(
    runner: &dyn CommandRunner,
    manager: PackageManager,
    method: &AuthMethod,
    package: &str,
) -> Result<(), PackageOpsError> {
    let command = wrap_with_auth(method, &removal_invocation(manager, package));
    let arg_refs: Vec<&str> = command[1..].iter().map(String::as_str).collect();
    let output = runner.run(&command[0], &arg_refs)?;
    if !output.success() {
        return Err(PackageOpsError::CommandFailed {
            command: command.join(" "),
            detail: if output.stderr.trim().is_empty() {
                format!("exit status {}", output.status)
            } else {
                output.stderr.trim().to_string()
            },
        });
    }
    Ok(())
}

/// Full removal flow for the application behind `descriptor_path`:
/// resolve the Exec program, find the owning package, remove it with
/// the given authentication method. Returns the removed package name.
pub fn remove_package_for_descriptor(
    runner: &dyn CommandRunner,
    manager: PackageManager,
    method: &AuthMethod,
    descriptor_path: &Path,
) -> Result<String, PackageOpsError> {
    let descriptor = DesktopEntry::from_path(descriptor_path)?;
    let command = descriptor
        .exec
        .as_deref()
        .and_then(clean_exec)
        .ok_or_else(|| PackageOpsError::NoExecCommand(descriptor_path.to_path_buf()))?;

    let program_path = resolve_program_path(&command);
    let package = query_owning_package(runner, manager, &program_path)?;
    remove_owned_package(runner, manager, method, &package)?;
    Ok(package)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{
        parse_owner, query_owning_package, remove_owned_package, removal_invocation,
        wrap_with_auth, AuthMethod, CommandOutput, CommandRunner, PackageManager,
        PackageOpsError,
    };

    struct FakeRunner {
        replies: RefCell<Vec<CommandOutput>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        fn new(replies: Vec<CommandOutput>) -> Self {
            Self {
                replies: RefCell::new(replies),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, PackageOpsError> {
            self.calls
                .borrow_mut()
                .push(format!("{program} {}", args.join(" ")));
            Ok(self.replies.borrow_mut().remove(0))
        }
    }

    fn ok_output(stdout: &str) -> CommandOutput {
        CommandOutput {
            status: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    #[test]
    fn dpkg_owner_output_is_parsed() {
        let owner = parse_owner(PackageManager::Dpkg, "vlc: /usr/bin/vlc\n");
        assert_eq!(owner, Some("vlc".to_string()));
    }

    #[test]
    fn pacman_owner_output_is_parsed() {
        let owner = parse_owner(
            PackageManager::Pacman,
            "/usr/bin/vlc is owned by vlc 3.0.20-1\n",
        );
        assert_eq!(owner, Some("vlc".to_string()));
    }

    #[test]
    fn unowned_program_yields_no_owner() {
        assert_eq!(parse_owner(PackageManager::Dpkg, ""), None);
        assert_eq!(
            parse_owner(PackageManager::Pacman, "error: No package owns /usr/local/bin/x\n"),
            None
        );
    }

    #[test]
    fn removal_invocations_match_each_manager() {
        assert_eq!(
            removal_invocation(PackageManager::Pacman, "vlc"),
            vec!["pacman", "-R", "--noconfirm", "vlc"]
        );
        assert_eq!(
            removal_invocation(PackageManager::Dpkg, "vlc"),
            vec!["apt", "remove", "-y", "vlc"]
        );
    }

    #[test]
    fn auth_wrapping_covers_all_methods() {
        let removal = removal_invocation(PackageManager::Dpkg, "vlc");
        assert_eq!(
            wrap_with_auth(&AuthMethod::Pkexec, &removal),
            vec!["pkexec", "apt", "remove", "-y", "vlc"]
        );
        assert_eq!(
            wrap_with_auth(&AuthMethod::SudoAskpass, &removal),
            vec!["sudo", "-A", "apt", "remove", "-y", "vlc"]
        );
        assert_eq!(
            wrap_with_auth(&AuthMethod::Terminal("xterm".to_string()), &removal),
            vec!["xterm", "-e", "sudo apt remove -y vlc"]
        );
    }

    #[test]
    fn owner_query_uses_runner_and_parses_package() {
        let runner = FakeRunner::new(vec![ok_output("/usr/bin/vlc is owned by vlc 3.0.20-1\n")]);
        let package =
            query_owning_package(&runner, PackageManager::Pacman, "/usr/bin/vlc").unwrap();

        assert_eq!(package, "vlc");
        assert_eq!(runner.calls(), vec!["pacman -Qo /usr/bin/vlc"]);
    }

    #[test]
    fn failed_owner_query_reports_owner_not_found() {
        let runner = FakeRunner::new(vec![CommandOutput {
            status: 1,
            stdout: String::new(),
            stderr: "no path found matching pattern\n".to_string(),
        }]);
        let result = query_owning_package(&runner, PackageManager::Dpkg, "/usr/local/bin/x");

        match result {
            Err(PackageOpsError::OwnerNotFound(program)) => {
                assert_eq!(program, "/usr/local/bin/x")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn removal_failure_carries_command_and_detail() {
        let runner = FakeRunner::new(vec![CommandOutput {
            status: 126,
            stdout: String::new(),
            stderr: "authentication failed\n".to_string(),
        }]);
        let result =
            remove_owned_package(&runner, PackageManager::Pacman, &AuthMethod::Pkexec, "vlc");

        match result {
            Err(PackageOpsError::CommandFailed { command, detail }) => {
                assert_eq!(command, "pkexec pacman -R --noconfirm vlc");
                assert_eq!(detail, "authentication failed");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
