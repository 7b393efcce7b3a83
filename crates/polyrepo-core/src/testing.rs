//! Recording fakes for the external collaborators

use crate::error::{CommandError, RemoteError};
use crate::git::VersionControl;
use crate::remote::{Account, OwnerKind, RemoteHost};
use crate::runtime::process::CommandRunner;
use crate::variants::Variant;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exec {
        program: String,
        args: Vec<String>,
        cwd: PathBuf,
    },
    Clone {
        url: String,
        dest: PathBuf,
        recursive: bool,
    },
    AddSubmodule {
        repo_dir: PathBuf,
        url: String,
        path: String,
    },
    StageAll {
        dir: PathBuf,
    },
    Commit {
        dir: PathBuf,
        message: String,
    },
    Push {
        dir: PathBuf,
        remote: String,
        branch: String,
    },
    Login,
    IsOrganization {
        owner: String,
    },
    DeleteRepo {
        owner: String,
        name: String,
    },
    CreateRepo {
        owner: String,
        kind: OwnerKind,
        name: String,
    },
}

impl Call {
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Call::Login | Call::IsOrganization { .. } | Call::DeleteRepo { .. } | Call::CreateRepo { .. }
        )
    }
}

/// Shared, ordered call log
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Index of the first call matching `pred`
    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(pred)
    }
}

type Matcher = Rc<dyn Fn(&Call) -> bool>;

fn injected_failure(call: &Call) -> CommandError {
    CommandError::Failed {
        command: format!("{:?}", call),
        code: 1,
        stderr: "injected failure".to_string(),
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("path has parent")).expect("create dirs");
    std::fs::write(path, content).expect("write file");
}

/// Fake git. A recursive clone lays out the template; a plain clone creates
/// an empty checkout; adding a submodule creates its checkout.
#[derive(Clone, Default)]
pub struct FakeGit {
    pub log: CallLog,
    missing_slices: Vec<&'static str>,
    fail_when: Option<Matcher>,
}

impl FakeGit {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Leave a variant's slice out of the cloned template
    pub fn without_slice(mut self, subpath: &'static str) -> Self {
        self.missing_slices.push(subpath);
        self
    }

    pub fn failing(mut self, pred: impl Fn(&Call) -> bool + 'static) -> Self {
        self.fail_when = Some(Rc::new(pred));
        self
    }

    fn record(&self, call: Call) -> Result<(), CommandError> {
        let fail = self.fail_when.as_ref().is_some_and(|f| f(&call));
        self.log.push(call.clone());
        if fail {
            Err(injected_failure(&call))
        } else {
            Ok(())
        }
    }
}

impl VersionControl for FakeGit {
    async fn clone_repo(
        &self,
        url: &str,
        dest: &Path,
        recursive: bool,
    ) -> Result<(), CommandError> {
        self.record(Call::Clone {
            url: url.to_string(),
            dest: dest.to_path_buf(),
            recursive,
        })?;

        write(&dest.join(".git/HEAD"), "ref: refs/heads/main");
        if recursive {
            for variant in Variant::ALL {
                let subpath = variant.subpath();
                if self.missing_slices.contains(&subpath) {
                    continue;
                }
                let slice = dest.join(subpath);
                write(&slice.join("package.json"), "{}");
                write(&slice.join(".git"), "gitdir: ../../.git/modules/slice");
            }
        }
        Ok(())
    }

    async fn add_submodule(
        &self,
        repo_dir: &Path,
        url: &str,
        path: &str,
    ) -> Result<(), CommandError> {
        self.record(Call::AddSubmodule {
            repo_dir: repo_dir.to_path_buf(),
            url: url.to_string(),
            path: path.to_string(),
        })?;
        write(&repo_dir.join(path).join(".git"), "gitdir: linked");
        Ok(())
    }

    async fn stage_all(&self, repo_dir: &Path) -> Result<(), CommandError> {
        self.record(Call::StageAll {
            dir: repo_dir.to_path_buf(),
        })
    }

    async fn commit(&self, repo_dir: &Path, message: &str) -> Result<(), CommandError> {
        self.record(Call::Commit {
            dir: repo_dir.to_path_buf(),
            message: message.to_string(),
        })
    }

    async fn push(&self, repo_dir: &Path, remote: &str, branch: &str) -> Result<(), CommandError> {
        self.record(Call::Push {
            dir: repo_dir.to_path_buf(),
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }
}

/// Fake process runner
#[derive(Clone, Default)]
pub struct FakeRunner {
    pub log: CallLog,
    fail_when: Option<Matcher>,
}

impl FakeRunner {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_when: None,
        }
    }

    pub fn failing(mut self, pred: impl Fn(&Call) -> bool + 'static) -> Self {
        self.fail_when = Some(Rc::new(pred));
        self
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), CommandError> {
        let call = Call::Exec {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        };
        let fail = self.fail_when.as_ref().is_some_and(|f| f(&call));
        self.log.push(call.clone());
        if fail {
            Err(injected_failure(&call))
        } else {
            Ok(())
        }
    }
}

/// Fake hosting API. Owners in `orgs` are organizations; any other lookup
/// answers 404 like GitHub does for user accounts. Deleting a repository that
/// is not in `existing` answers 404.
#[derive(Clone, Default)]
pub struct FakeHost {
    pub log: CallLog,
    login: Option<String>,
    orgs: Vec<String>,
    existing: Vec<String>,
    fail_create: Option<String>,
}

impl FakeHost {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn with_login(mut self, login: &str) -> Self {
        self.login = Some(login.to_string());
        self
    }

    pub fn with_org(mut self, org: &str) -> Self {
        self.orgs.push(org.to_string());
        self
    }

    pub fn with_existing(mut self, repo: &str) -> Self {
        self.existing.push(repo.to_string());
        self
    }

    /// Make creation of `repo` fail with HTTP 422
    pub fn failing_create(mut self, repo: &str) -> Self {
        self.fail_create = Some(repo.to_string());
        self
    }

    fn not_found(method: &'static str, url: String) -> RemoteError {
        RemoteError::Status {
            method,
            url,
            status: 404,
            body: "Not Found".to_string(),
        }
    }
}

impl RemoteHost for FakeHost {
    async fn authenticated_login(&self) -> Result<String, RemoteError> {
        self.log.push(Call::Login);
        self.login
            .clone()
            .ok_or_else(|| Self::not_found("GET", "/user".to_string()))
    }

    async fn is_organization(&self, owner: &str) -> Result<bool, RemoteError> {
        self.log.push(Call::IsOrganization {
            owner: owner.to_string(),
        });
        if self.orgs.iter().any(|o| o == owner) {
            Ok(true)
        } else {
            Err(Self::not_found("GET", format!("/orgs/{}", owner)))
        }
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), RemoteError> {
        self.log.push(Call::DeleteRepo {
            owner: owner.to_string(),
            name: name.to_string(),
        });
        if self.existing.iter().any(|r| r == name) {
            Ok(())
        } else {
            Err(Self::not_found("DELETE", format!("/repos/{}/{}", owner, name)))
        }
    }

    async fn create_repository(&self, account: &Account, name: &str) -> Result<(), RemoteError> {
        self.log.push(Call::CreateRepo {
            owner: account.owner.clone(),
            kind: account.kind,
            name: name.to_string(),
        });
        if self.fail_create.as_deref() == Some(name) {
            return Err(RemoteError::Status {
                method: "POST",
                url: "/user/repos".to_string(),
                status: 422,
                body: "name already exists on this account".to_string(),
            });
        }
        Ok(())
    }
}
