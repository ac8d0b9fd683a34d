//! In-memory capability service that records every call

use crate::access::AccessFs;
use crate::service::{LandlockService, PrivilegeControl};
use std::cell::RefCell;
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(AccessFs),
    AddRule { target: PathBuf, allowed: AccessFs },
    NoNewPrivs,
    RestrictSelf,
    Release,
}

type Log = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Default)]
pub struct FakeKernel {
    log: Log,
    create_errno: Option<i32>,
    no_new_privs_errno: Option<i32>,
    restrict_errno: Option<i32>,
}

#[derive(Debug)]
pub struct FakeHandle {
    handled: AccessFs,
    log: Log,
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Call::Release);
    }
}

impl FakeKernel {
    pub fn failing_create(errno: i32) -> Self {
        Self {
            create_errno: Some(errno),
            ..Default::default()
        }
    }

    pub fn failing_no_new_privs(errno: i32) -> Self {
        Self {
            no_new_privs_errno: Some(errno),
            ..Default::default()
        }
    }

    pub fn failing_restrict(errno: i32) -> Self {
        Self {
            restrict_errno: Some(errno),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    fn push(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

fn fail(errno: Option<i32>) -> io::Result<()> {
    match errno {
        Some(errno) => Err(io::Error::from_raw_os_error(errno)),
        None => Ok(()),
    }
}

impl LandlockService for FakeKernel {
    type Handle = FakeHandle;

    fn create_ruleset(&self, handled: AccessFs) -> io::Result<FakeHandle> {
        fail(self.create_errno)?;
        self.push(Call::Create(handled));
        Ok(FakeHandle {
            handled,
            log: Rc::clone(&self.log),
        })
    }

    fn add_path_beneath(
        &self,
        ruleset: &FakeHandle,
        parent: BorrowedFd<'_>,
        allowed: AccessFs,
    ) -> io::Result<()> {
        if !ruleset.handled.contains(allowed) {
            return Err(io::Error::from_raw_os_error(libc::EINVAL));
        }
        let target = std::fs::read_link(format!("/proc/self/fd/{}", parent.as_raw_fd()))?;
        self.push(Call::AddRule { target, allowed });
        Ok(())
    }

    fn restrict_self(&self, _ruleset: &FakeHandle) -> io::Result<()> {
        self.push(Call::RestrictSelf);
        fail(self.restrict_errno)
    }
}

impl PrivilegeControl for FakeKernel {
    fn set_no_new_privs(&self) -> io::Result<()> {
        self.push(Call::NoNewPrivs);
        fail(self.no_new_privs_errno)
    }
}
