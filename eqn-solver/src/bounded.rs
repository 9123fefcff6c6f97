//! Solving under a wall-clock deadline.
//!
//! Every call runs the solver on its own worker thread with its own [`CancelToken`], and waits
//! for the answer with [`mpsc::Receiver::recv_timeout`]. Whatever way the call returns, the
//! token is cancelled on the way out, so the worker stops at its next check and nothing carries
//! over into later calls.

use eqn_compute::{
    cancel::CancelToken,
    symbolic::{solve::{solve, SolveError}, SymExpr},
};
use eqn_error::Error;
use log::{debug, warn};
use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use crate::{equation::Equation, error::{bounded_detail, SolveTimeout, UnexpectedSolverFailure}};

/// Cancels its token when dropped.
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

fn timeout(deadline: Duration) -> Error {
    warn!("solving timed out after {:?}", deadline);
    Error::spanless(SolveTimeout { seconds: deadline.as_secs_f64() })
}

/// What the worker thread sends back.
type SolveResult = Result<Vec<SymExpr>, SolveError>;

/// Starts solving the equation on a new worker thread, which stops once `token` is cancelled.
fn spawn_solver(
    equation: &Equation,
    symbol: &str,
    token: CancelToken,
) -> Result<(Receiver<SolveResult>, JoinHandle<()>), Error> {
    let (sender, receiver) = mpsc::channel();
    let lhs = equation.lhs.clone();
    let rhs = equation.rhs.clone();
    let name = symbol.to_string();

    let worker = thread::Builder::new()
        .name("eqn-solve".to_string())
        .spawn(move || {
            let result = if token.is_cancelled() {
                Err(SolveError::Cancelled)
            } else {
                solve(&lhs, &rhs, &name, &token)
            };
            // the receiver is gone if the caller already timed out
            let _ = sender.send(result);
        })
        .map_err(|err| Error::spanless(UnexpectedSolverFailure {
            detail: bounded_detail(&err.to_string()),
        }))?;

    Ok((receiver, worker))
}

/// Solves the equation for the symbol, giving up once `deadline` has elapsed.
///
/// Solver failures other than a timeout give an empty solution set, as does a panic inside the
/// solver.
pub fn solve_bounded(equation: &Equation, symbol: &str, deadline: Duration) -> Result<Vec<SymExpr>, Error> {
    let token = CancelToken::with_deadline(Instant::now() + deadline);
    let guard = CancelOnDrop(token.clone());
    let (receiver, _worker) = spawn_solver(equation, symbol, token)?;

    let solutions = match receiver.recv_timeout(deadline) {
        Ok(Ok(solutions)) => solutions,
        Ok(Err(SolveError::Cancelled)) | Err(RecvTimeoutError::Timeout) => return Err(timeout(deadline)),
        Ok(Err(err)) => {
            debug!("solver gave up: {}", err);
            Vec::new()
        },
        Err(RecvTimeoutError::Disconnected) => {
            warn!("solver worker panicked");
            Vec::new()
        },
    };
    drop(guard);

    debug!("found {} solution(s)", solutions.len());
    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::equation::build;
    use super::*;

    fn solutions(input: &str, deadline: Duration) -> Result<Vec<String>, Error> {
        let equation = build(input)?;
        Ok(solve_bounded(&equation, "x", deadline)?
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    #[test]
    fn solves_within_deadline() {
        assert_eq!(solutions("x**2-4=0", Duration::from_secs(4)).unwrap(), vec!["-2", "2"]);
    }

    #[test]
    fn unsupported_is_empty() {
        assert_eq!(solutions("x=x+1", Duration::from_secs(4)).unwrap(), Vec::<String>::new());
        assert_eq!(solutions("x*sin(x)=1", Duration::from_secs(4)).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn expired_deadline_times_out() {
        let err = solutions("x**2-4=0", Duration::ZERO).unwrap_err();
        assert!(err.is::<SolveTimeout>());
        assert_eq!(err.message(), "Solving timed out after 0s");
    }

    #[test]
    fn timeout_does_not_leak() {
        assert!(solutions("x**3-x=0", Duration::ZERO).is_err());
        assert_eq!(solutions("x**3-x=0", Duration::from_secs(4)).unwrap(), vec!["-1", "0", "1"]);
    }

    /// No rational roots, so its roots are found numerically, one slow iteration at a time.
    const SLOW: &str = "x**60+x+1=0";

    #[test]
    fn running_solve_stops_at_deadline() {
        let equation = build(SLOW).unwrap();
        let start = Instant::now();
        let token = CancelToken::with_deadline(start + Duration::from_millis(20));
        let (receiver, worker) = spawn_solver(&equation, "x", token).unwrap();

        worker.join().unwrap();
        assert!(start.elapsed() < Duration::from_secs(10), "worker ran for {:?}", start.elapsed());
        assert_eq!(receiver.recv().unwrap(), Err(SolveError::Cancelled));
    }

    #[test]
    fn huge_power_returns_promptly() {
        let start = Instant::now();
        assert_eq!(solutions("x**1000000000=2", Duration::from_secs(4)).unwrap(), Vec::<String>::new());
        assert!(start.elapsed() < Duration::from_secs(4));
        assert_eq!(solutions("x**2=9", Duration::from_secs(4)).unwrap(), vec!["-3", "3"]);
    }

    #[test]
    fn concurrent_solves_keep_their_own_deadlines() {
        let (slow, fast) = thread::scope(|scope| {
            let slow = scope.spawn(|| solutions(SLOW, Duration::from_millis(20)));
            let fast = scope.spawn(|| solutions("x**2-4=0", Duration::from_secs(30)));
            (slow.join().unwrap(), fast.join().unwrap())
        });

        assert!(slow.unwrap_err().is::<SolveTimeout>());
        assert_eq!(fast.unwrap(), vec!["-2", "2"]);
    }
}
