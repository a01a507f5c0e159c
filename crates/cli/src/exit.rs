//! Process exit codes inspected by the supervising pilot.
//!
//! Codes 2 through 11 belong to a legacy per-argument validation scheme that
//! clap's required-flag handling has replaced; they stay reserved so the
//! supervisor-facing numbering never shifts.

pub const SUCCESS: i32 = 0;
pub const GENERAL_FAILURE: i32 = 1;
#[allow(dead_code)]
pub const NO_QUEUENAME: i32 = 2;
#[allow(dead_code)]
pub const NO_SCOPES: i32 = 3;
#[allow(dead_code)]
pub const NO_LFNS: i32 = 4;
#[allow(dead_code)]
pub const NO_EVENTTYPE: i32 = 5;
#[allow(dead_code)]
pub const NO_LOCALSITE: i32 = 6;
#[allow(dead_code)]
pub const NO_REMOTESITE: i32 = 7;
#[allow(dead_code)]
pub const NO_PRODUSERID: i32 = 8;
#[allow(dead_code)]
pub const NO_JOBID: i32 = 9;
#[allow(dead_code)]
pub const NO_TASKID: i32 = 10;
#[allow(dead_code)]
pub const NO_JOBDEFINITIONID: i32 = 11;
pub const TRANSFER_ERROR: i32 = 12;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_numbering_is_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(GENERAL_FAILURE, 1);
        assert_eq!(NO_QUEUENAME, 2);
        assert_eq!(NO_SCOPES, 3);
        assert_eq!(NO_LFNS, 4);
        assert_eq!(NO_EVENTTYPE, 5);
        assert_eq!(NO_LOCALSITE, 6);
        assert_eq!(NO_REMOTESITE, 7);
        assert_eq!(NO_PRODUSERID, 8);
        assert_eq!(NO_JOBID, 9);
        assert_eq!(NO_TASKID, 10);
        assert_eq!(NO_JOBDEFINITIONID, 11);
        assert_eq!(TRANSFER_ERROR, 12);
    }
}
