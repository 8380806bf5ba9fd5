//! A scripted [`Environment`] that records instead of running processes.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use pip_sync_core::{ActivityReporter, Environment, Error, Result};

use crate::project::TestProject;

/// One interaction with the environment, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Run {
        program: String,
        args: Vec<String>,
        cwd: PathBuf,
    },
    Install {
        packages: Vec<String>,
    },
}

impl Call {
    /// Program name of a `Run` call, without directory or extension
    pub fn program(&self) -> Option<&str> {
        match self {
            Self::Run { program, .. } => Some(program),
            Self::Install { .. } => None,
        }
    }
}

/// What the fake `pip-compile` does with its input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileBehaviour {
    /// Write the `.txt` next to the `.in`, pinning nothing
    WritePinned,
    /// Exit successfully without writing anything
    WriteNothing,
}

/// Environment whose processes are recorded rather than run.
///
/// `install` creates placeholder `pip-compile` and `pip-sync` executables
/// unless told otherwise, so the bootstrap path can be exercised.
pub struct FakeEnvironment {
    name: String,
    env_dir: PathBuf,
    project_root: PathBuf,
    deps: Vec<String>,
    compile: CompileBehaviour,
    install_provides_tools: bool,
    failing_program: Option<String>,
    calls: RefCell<Vec<Call>>,
}

impl FakeEnvironment {
    /// Environment for `project` declaring `deps`.
    pub fn new(project: &TestProject, deps: &[&str]) -> Self {
        Self {
            name: project.env_name().to_string(),
            env_dir: project.env_dir(),
            project_root: project.root().to_path_buf(),
            deps: deps.iter().map(ToString::to_string).collect(),
            compile: CompileBehaviour::WritePinned,
            install_provides_tools: true,
            failing_program: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_compile(mut self, compile: CompileBehaviour) -> Self {
        self.compile = compile;
        self
    }

    /// Make `install` succeed without providing any executable
    pub fn with_broken_install(mut self) -> Self {
        self.install_provides_tools = false;
        self
    }

    /// Make every run of `program` exit with code 1
    pub fn with_failing(mut self, program: &str) -> Self {
        self.failing_program = Some(program.to_string());
        self
    }

    /// Create the pip-tools executables, as if already installed
    pub fn with_tools_installed(self) -> Self {
        self.create_tools();
        self
    }

    /// Replace the declared dependencies
    pub fn set_deps(&mut self, deps: &[&str]) {
        self.deps = deps.iter().map(ToString::to_string).collect();
    }

    /// Everything that happened so far
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Names of the programs run so far, in order
    pub fn programs_run(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| call.program().map(ToString::to_string))
            .collect()
    }

    /// Number of `install` calls so far
    pub fn installs(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::Install { .. }))
            .count()
    }

    /// Arguments of the last run of `program`
    pub fn last_args(&self, program: &str) -> Option<Vec<String>> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            Call::Run { program: p, args, .. } if p == program => Some(args.clone()),
            _ => None,
        })
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn create_tools(&self) {
        let bin_dir = self.bin_dir();
        fs::create_dir_all(&bin_dir).unwrap();
        for tool in ["pip-compile", "pip-sync"] {
            let exe = bin_dir.join(format!("{tool}{}", std::env::consts::EXE_SUFFIX));
            fs::write(exe, "").unwrap();
        }
    }
}

impl Environment for FakeEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn env_dir(&self) -> &Path {
        &self.env_dir
    }

    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn deps(&self) -> &[String] {
        &self.deps
    }

    fn run(&self, program: &Path, args: &[OsString], cwd: &Path) -> Result<String> {
        let name = program
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.calls.borrow_mut().push(Call::Run {
            program: name.clone(),
            args: args.clone(),
            cwd: cwd.to_path_buf(),
        });

        if self.failing_program.as_deref() == Some(name.as_str()) {
            return Err(Error::CommandFailed {
                command: format!("{name} {}", args.join(" ")),
                code: Some(1),
                output: "simulated failure".to_string(),
            });
        }

        if name == "pip-compile"
            && self.compile == CompileBehaviour::WritePinned
            && let Some(input) = args.first()
        {
            let input = Path::new(input);
            let unpinned = fs::read_to_string(input).unwrap_or_default();
            fs::write(input.with_extension("txt"), format!("# compiled\n{unpinned}\n")).unwrap();
        }

        Ok(format!("{name} ok"))
    }

    fn install(&self, packages: &[&str]) -> Result<()> {
        self.calls.borrow_mut().push(Call::Install {
            packages: packages.iter().map(ToString::to_string).collect(),
        });
        if self.install_provides_tools {
            self.create_tools();
        }
        Ok(())
    }
}

/// Reporter that keeps every activity it was given
#[derive(Debug, Default)]
pub struct RecordingReporter {
    activities: RefCell<Vec<(String, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(name, message)` pairs in the order they were reported
    pub fn activities(&self) -> Vec<(String, String)> {
        self.activities.borrow().clone()
    }
}

impl ActivityReporter for RecordingReporter {
    fn set_activity(&self, name: &str, message: &str) {
        self.activities
            .borrow_mut()
            .push((name.to_string(), message.to_string()));
    }
}
