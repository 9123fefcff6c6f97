use eqn_solver::{
    config::SolverConfig,
    error::{InputTooLong, SolveTimeout, VariableNotPresent},
    format::{CopyPayloads, DisplayMode},
    normalize::normalize,
    response::{Request, Response},
    solve_equation,
    solve_request,
    variable::VariablePolicy,
};
use pretty_assertions::assert_eq;

fn respond(equation: &str, variable: &str) -> Response {
    solve_request(&Request::new(equation, variable), &SolverConfig::default())
}

/// Returns the plain form of each solution of the equation, solved for `x`.
fn plain(equation: &str) -> Vec<String> {
    respond(equation, "x")
        .solutions()
        .iter()
        .map(|solution| solution.plain.clone())
        .collect()
}

fn error_message(response: Response) -> String {
    match response {
        Response::Error(failed) => failed.error,
        other => panic!("expected an error response, got {:?}", other),
    }
}

#[test]
fn long_input_is_rejected() {
    let input = format!("x={}", "1+".repeat(300));
    let err = solve_equation(&input, "x", &SolverConfig::default()).unwrap_err();
    assert!(err.is::<InputTooLong>());
    assert_eq!(error_message(respond(&input, "x")), "Input too long (max 500 chars)");
}

#[test]
fn empty_equation() {
    assert_eq!(error_message(respond("   ", "x")), "Enter an equation");
}

#[test]
fn normalizer_is_idempotent() {
    for input in ["2x^2 + 3x = 5", "xsinx", r"\frac{1}{x} = 2", "sqrt x = 3", "2(x+1)(x-1)"] {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn adjacency_is_multiplication() {
    assert_eq!(normalize("2x"), normalize("2*x"));
    assert_eq!(normalize("xy"), normalize("x*y"));
    assert_eq!(respond("2x = 4", "x"), respond("2*x = 4", "x"));
}

#[test]
fn linear_solution() {
    match respond("x-5=0", "x") {
        Response::Success(solved) => {
            assert_eq!(solved.count, 1);
            assert_eq!(solved.variable, "x");
            assert_eq!(solved.equation, "x - 5 = 0");
            assert_eq!(solved.solutions[0].exact, "5");
            assert_eq!(solved.solutions[0].decimal, "5.0");
            assert_eq!(solved.solutions[0].plain, "5");
        },
        other => panic!("expected a solution, got {:?}", other),
    }
}

#[test]
fn quadratic_solutions() {
    let mut solutions = plain("x^2-4=0");
    solutions.sort();
    assert_eq!(solutions, vec!["-2", "2"]);
}

#[test]
fn missing_variable() {
    let err = solve_equation("y=1", "x", &SolverConfig::default()).unwrap_err();
    let kind = err.downcast_ref::<VariableNotPresent>().unwrap();
    assert_eq!(kind.found, vec!["y".to_string()]);
    assert_eq!(error_message(respond("y=1", "x")), "Variable \"x\" not found. Found: y");
}

#[test]
fn invalid_variable() {
    assert_eq!(error_message(respond("x=1", "xy")), "Variable must be a single letter (a-z)");
    assert_eq!(plain("x = 1").len(), 1);

    // trimmed and lowercased first
    let response = respond("x+1=3", " X ");
    assert_eq!(response.solutions()[0].plain, "2");
}

#[test]
fn relaxed_variable_policy() {
    let config = SolverConfig { variable_policy: VariablePolicy::Relaxed, ..SolverConfig::default() };
    let response = solve_request(&Request::new("y=1", "abc"), &config);
    assert_eq!(error_message(response), "Variable \"abc\" not found. Found: y");
}

#[test]
fn contradiction_has_no_solution() {
    match respond("x=x+1", "x") {
        Response::NoSolution(none) => {
            assert!(none.no_solution);
            assert_eq!(none.message, "No solutions found");
        },
        other => panic!("expected no solution, got {:?}", other),
    }
}

#[test]
fn timeout_is_reported_and_disarmed() {
    let expired = SolverConfig { deadline_ms: 0, ..SolverConfig::default() };
    let err = solve_equation("x^3 - 6x^2 + 11x - 6 = 0", "x", &expired).unwrap_err();
    assert!(err.is::<SolveTimeout>());
    assert_eq!(
        error_message(solve_request(&Request::new("x^2 = 1", "x"), &expired)),
        "Solving timed out after 0s",
    );

    assert_eq!(plain("x^3 - 6x^2 + 11x - 6 = 0"), vec!["1", "2", "3"]);
}

#[test]
fn slow_equation_times_out_while_others_solve() {
    let tight = SolverConfig { deadline_ms: 20, ..SolverConfig::default() };
    let (slow, fast) = std::thread::scope(|scope| {
        let slow = scope.spawn(|| solve_request(&Request::new("x^60 + x + 1 = 0", "x"), &tight));
        let fast = scope.spawn(|| respond("x^2 - 4 = 0", "x"));
        (slow.join().unwrap(), fast.join().unwrap())
    });

    assert_eq!(error_message(slow), "Solving timed out after 0.02s");
    assert_eq!(fast.solutions().len(), 2);
}

#[test]
fn huge_power_does_not_stall() {
    match respond("x^1000000000 = 2", "x") {
        Response::NoSolution(none) => assert!(none.no_solution),
        other => panic!("expected no solution, got {:?}", other),
    }
    assert_eq!(plain("x^2 = 9"), vec!["-3", "3"]);
}

#[test]
fn function_power_needs_an_argument() {
    let message = error_message(respond("sin^2 + 1 = x", "x"));
    assert!(message.starts_with("Cannot understand: "), "{}", message);
}

#[test]
fn parse_errors_are_reported() {
    let message = error_message(respond("x+1=", "x"));
    assert!(message.starts_with("Cannot understand: "), "{}", message);

    let message = error_message(respond("x = 1 ∑", "x"));
    assert!(message.starts_with("Cannot understand: "), "{}", message);
}

#[test]
fn trigonometric_equation() {
    assert_eq!(plain("sin(x)=1/2"), vec!["pi/6", "5*pi/6"]);

    let response = respond("sin(x)=1/2", "x");
    assert_eq!(response.solutions()[1].exact, "\\frac{5 \\pi}{6}");
}

#[test]
fn exponential_equation() {
    assert_eq!(plain("2^x=32"), vec!["5"]);
}

#[test]
fn complex_solutions() {
    let response = respond("x^2=-4", "x");
    let solutions = response.solutions();
    assert_eq!(solutions.len(), 2);
    assert_eq!(solutions[0].plain, "-2*I");
    assert_eq!(solutions[0].decimal, "-2.0*I");
    assert_eq!(solutions[1].plain, "2*I");
    assert_eq!(solutions[1].decimal, "2.0*I");
}

#[test]
fn reciprocal_equation() {
    let response = respond("1/x=2", "x");
    assert_eq!(response.solutions()[0].plain, "1/2");
    assert_eq!(response.solutions()[0].decimal, "0.5");
}

#[test]
fn irrational_solutions() {
    let response = respond("x^2-2=0", "x");
    let solutions = response.solutions();
    assert_eq!(solutions.len(), 2);
    assert_eq!(solutions[0].plain, "-sqrt(2)");
    assert_eq!(solutions[1].plain, "sqrt(2)");
    assert_eq!(solutions[1].exact, "\\sqrt{2}");
    assert_eq!(solutions[1].decimal, "1.4142135624");
}

#[test]
fn latex_input() {
    assert_eq!(plain(r"\frac{x}{2}=3"), vec!["6"]);
    assert_eq!(plain(r"$\sqrt{x} = 3$"), vec!["9"]);
}

#[test]
fn unicode_input() {
    assert_eq!(plain("x²=9"), vec!["-3", "3"]);
    assert_eq!(plain("2×x − 4 = 0"), vec!["2"]);
}

#[test]
fn natural_language_input() {
    assert_eq!(plain("square root of x = 3"), vec!["9"]);
}

#[test]
fn equation_without_equals_sign() {
    assert_eq!(plain("x^2 - 9"), vec!["-3", "3"]);
}

#[test]
fn copy_payloads_follow_display_mode() {
    let response = respond("x^2-2=0", "x");
    let solution = &response.solutions()[1];

    let exact = CopyPayloads::new(solution, DisplayMode::Exact);
    assert_eq!(exact.markdown, "$$\\sqrt{2}$$");
    assert_eq!(exact.plain, "sqrt(2)");

    let decimal = CopyPayloads::new(solution, DisplayMode::Decimal);
    assert_eq!(decimal.latex, "1.4142135624");
    assert_eq!(decimal.html, "1.4142135624");
}

#[test]
fn responses_serialize_as_json() {
    let json = respond("x-5=0", "x").to_json();
    assert_eq!(
        json,
        r#"{"success":true,"equation":"x - 5 = 0","variable":"x","solutions":[{"exact":"5","decimal":"5.0","plain":"5"}],"count":1}"#,
    );

    let request: Request = serde_json::from_str(r#"{"equation": "x-5=0"}"#).unwrap();
    assert_eq!(solve_request(&request, &SolverConfig::default()).to_json(), json);
}
