use std::{
    convert::{TryFrom, TryInto},
    path::Path,
};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::{
    conditions::derive::{consistent_within, entails_within},
    synth::cegis::{cegis_recover_with_limits, CegisResult},
    Constant, Equality, HypothesisSpace, Implication, Limits, Term,
};

// A cute lil' macro to time function calls.
#[macro_export]
macro_rules! time_fn_call {
    ($label:expr, $fn_call:expr) => {{
        use std::time::Instant;
        let start = Instant::now();
        let result = $fn_call;
        let duration = start.elapsed();
        log::info!("finished {} in {} ms", $label, duration.as_millis());
        result
    }};
}

/// One trust-recovery problem: what is known, what should follow, the noisy
/// candidate rules, and the conclusions known to be wrong.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub name: String,
    pub premises: Vec<Equality>,
    pub target: Equality,
    pub hypotheses: HypothesisSpace,
    pub forbidden: Vec<Equality>,
}

impl Problem {
    pub fn recover(&self, limits: Limits) -> CegisResult {
        time_fn_call!(
            self.name.as_str(),
            cegis_recover_with_limits(
                &self.premises,
                &self.target,
                &self.hypotheses,
                &self.forbidden,
                limits,
            )
        )
    }

    /// Checks that `rules` is consistent with the premises, proves the
    /// target, and proves none of the forbidden conclusions.
    pub fn check_recovery(&self, rules: &[Implication], limits: Limits) -> Result<(), String> {
        if !consistent_within(&self.premises, rules, limits.max_steps) {
            return Err(format!("{}: recovered rules are inconsistent", self.name));
        }
        if !entails_within(&self.premises, rules, &self.target, limits.max_steps) {
            return Err(format!(
                "{}: recovered rules do not entail {}",
                self.name, self.target
            ));
        }
        if let Some(bad) = self
            .forbidden
            .iter()
            .find(|c| entails_within(&self.premises, rules, c, limits.max_steps))
        {
            return Err(format!("{}: recovered rules entail {}", self.name, bad));
        }
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let file: ProblemFile = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
        file.try_into()
    }
}

/// The on-disk form of a [`Problem`]. Equalities and rules are written in
/// s-expression syntax, e.g. `"(= (+ x 3) 7)"` and
/// `"(= (+ x 3) 7) ==> (= x 4)"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProblemFile {
    pub name: String,
    pub premises: Vec<String>,
    pub target: String,
    pub hypotheses: Vec<String>,
    #[serde(default)]
    pub forbidden: Vec<String>,
}

impl TryFrom<ProblemFile> for Problem {
    type Error = String;

    fn try_from(file: ProblemFile) -> Result<Self, Self::Error> {
        let parse_all = |xs: &[String]| -> Result<Vec<Equality>, String> {
            xs.iter().map(|x| x.parse()).collect()
        };
        Ok(Problem {
            premises: parse_all(&file.premises)?,
            target: file.target.parse()?,
            hypotheses: HypothesisSpace::new(&file.hypotheses)?,
            forbidden: parse_all(&file.forbidden)?,
            name: file.name,
        })
    }
}

impl From<&Problem> for ProblemFile {
    fn from(problem: &Problem) -> Self {
        let sexps = |xs: &[Equality]| -> Vec<String> {
            xs.iter().map(|x| x.to_sexp().to_string()).collect()
        };
        ProblemFile {
            name: problem.name.clone(),
            premises: sexps(&problem.premises),
            target: problem.target.to_sexp().to_string(),
            hypotheses: problem.hypotheses.to_str_vec(),
            forbidden: sexps(&problem.forbidden),
        }
    }
}

/// Premise `x + a = b`, target `k*x = k*(b-a)`.
///
/// The hypotheses are the two helpful rules `x+a=b -> x=(b-a)` and
/// `x=(b-a) -> k*x=k*(b-a)`, followed for each wrong value `w` by the two
/// hallucinated shortcuts `x+a=b -> k*x=w` and `x=(b-a) -> k*x=w`. Each
/// `k*x=w` is forbidden.
pub fn make_linear_example(
    name: &str,
    a: Constant,
    b: Constant,
    k: Constant,
    wrong_vals: &[Constant],
) -> Result<Problem, String> {
    let v = b
        .checked_sub(a)
        .ok_or_else(|| format!("{name}: {b} - {a} overflows"))?;
    let kv = k
        .checked_mul(v)
        .ok_or_else(|| format!("{name}: {k} * {v} overflows"))?;

    let x = Term::var("x");
    let kx = Term::mul(Term::constant(k), x.clone());
    let premise = Equality::new(Term::add(x.clone(), Term::constant(a)), Term::constant(b));
    let solved = Equality::new(x, Term::constant(v));
    let target = Equality::new(kx.clone(), Term::constant(kv));
    let wrong: Vec<Equality> = wrong_vals
        .iter()
        .map(|w| Equality::new(kx.clone(), Term::constant(*w)))
        .collect();

    let mut hypotheses = HypothesisSpace::default();
    hypotheses.add(Implication::new(premise.clone(), solved.clone()));
    hypotheses.add(Implication::new(solved.clone(), target.clone()));
    for w in &wrong {
        hypotheses.add(Implication::new(premise.clone(), w.clone()));
        hypotheses.add(Implication::new(solved.clone(), w.clone()));
    }

    Ok(Problem {
        name: name.to_string(),
        premises: vec![premise],
        target,
        hypotheses,
        forbidden: wrong,
    })
}

/// Eight small variations on the same linear problem.
pub fn demo_suite() -> Vec<Problem> {
    let params: [(&str, Constant, Constant, Constant, [Constant; 2]); 8] = [
        ("E1: x+3=7, 2x", 3, 7, 2, [10, 14]),
        ("E2: x+5=12, 2x", 5, 12, 2, [12, 16]),
        ("E3: x+1=9, 3x", 1, 9, 3, [21, 30]),
        ("E4: x+4=11, 3x", 4, 11, 3, [15, 24]),
        ("E5: x+6=20, 2x", 6, 20, 2, [24, 30]),
        ("E6: x+2=10, 4x", 2, 10, 4, [28, 40]),
        ("E7: x+7=19, 3x", 7, 19, 3, [27, 45]),
        ("E8: x+8=23, 2x", 8, 23, 2, [24, 40]),
    ];
    params
        .iter()
        .filter_map(|(name, a, b, k, wrong)| {
            // small constants, never overflows
            make_linear_example(name, *a, *b, *k, wrong).ok()
        })
        .collect()
}

/// `n` seeded linear problems with one to three wrong values each, all
/// different from the true product.
pub fn random_linear_problems(n: usize, seed: u64) -> Vec<Problem> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut problems = vec![];
    while problems.len() < n {
        let a: Constant = rng.gen_range(1, 10);
        let b: Constant = rng.gen_range(a + 1, 30);
        let k: Constant = rng.gen_range(2, 6);
        let kv = k * (b - a);
        let mut wrong: Vec<Constant> = vec![];
        for _ in 0..rng.gen_range(1, 4) {
            let w = rng.gen_range(0, kv * 3 + 1);
            if w != kv && !wrong.contains(&w) {
                wrong.push(w);
            }
        }
        if wrong.is_empty() {
            continue;
        }
        let name = format!("R{}: x+{a}={b}, {k}x", problems.len() + 1);
        if let Ok(problem) = make_linear_example(&name, a, b, k, &wrong) {
            problems.push(problem);
        }
    }
    problems
}
