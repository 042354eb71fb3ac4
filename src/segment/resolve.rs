//! Script-inheritance resolution: folding `Common`/`Inherited` into
//! the concrete script of their surrounding context (spec.md §4.1
//! step 4).

use crate::script::Script;

/// Two-pass resolution of `Inherited` and `Common` scripts into
/// concrete neighbors, in reading order.
pub fn resolve_scripts(scripts: &[Script]) -> Vec<Script> {
    resolve_common(&resolve_inherited(scripts))
}

/// Pass A: every `Inherited` becomes the last concrete (non-`Common`,
/// non-`Inherited`) script seen so far; before any concrete script is
/// seen, that default is `Common`.
fn resolve_inherited(scripts: &[Script]) -> Vec<Script> {
    let mut out = Vec::with_capacity(scripts.len());
    let mut last_concrete = Script::Common;
    for &script in scripts {
        match script {
            Script::Inherited => out.push(last_concrete),
            other => {
                if !other.is_context_dependent() {
                    last_concrete = other;
                }
                out.push(other);
            }
        }
    }
    out
}

/// Pass B: every remaining `Common` becomes the previous concrete
/// script, the next one (looking forward past intervening `Common`),
/// or stays `Common` if surrounded only by `Common`.
fn resolve_common(scripts: &[Script]) -> Vec<Script> {
    let mut out = scripts.to_vec();
    for i in 0..out.len() {
        if out[i] != Script::Common {
            continue;
        }
        let prev = if i > 0 { out[i - 1] } else { Script::Common };
        let mut j = i + 1;
        while j < scripts.len() && scripts[j] == Script::Common {
            j += 1;
        }
        let next = if j < scripts.len() { scripts[j] } else { Script::Common };

        out[i] = if prev == next {
            prev
        } else if next == Script::Common {
            prev
        } else if prev == Script::Common {
            next
        } else {
            Script::Common
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherited_takes_preceding_concrete_script() {
        let scripts = [Script::Latin, Script::Inherited, Script::Inherited];
        assert_eq!(resolve_scripts(&scripts), vec![Script::Latin, Script::Latin, Script::Latin]);
    }

    #[test]
    fn leading_inherited_defaults_to_common_then_resolves() {
        // Inherited with nothing before it defaults to Common, then
        // pass B may still pull it toward a following concrete script.
        let scripts = [Script::Inherited, Script::Latin];
        assert_eq!(resolve_scripts(&scripts), vec![Script::Latin, Script::Latin]);
    }

    #[test]
    fn common_between_equal_neighbors_takes_that_script() {
        let scripts = [Script::Latin, Script::Common, Script::Latin];
        assert_eq!(resolve_scripts(&scripts), vec![Script::Latin; 3]);
    }

    #[test]
    fn common_between_different_scripts_stays_common() {
        let scripts = [Script::Latin, Script::Common, Script::Arabic];
        assert_eq!(
            resolve_scripts(&scripts),
            vec![Script::Latin, Script::Common, Script::Arabic]
        );
    }

    #[test]
    fn common_surrounded_only_by_common_stays_common() {
        let scripts = [Script::Common, Script::Common, Script::Common];
        assert_eq!(resolve_scripts(&scripts), vec![Script::Common; 3]);
    }

    #[test]
    fn common_at_boundary_takes_the_concrete_side() {
        let scripts = [Script::Latin, Script::Common];
        assert_eq!(resolve_scripts(&scripts), vec![Script::Latin, Script::Latin]);
        let scripts = [Script::Common, Script::Latin];
        assert_eq!(resolve_scripts(&scripts), vec![Script::Latin, Script::Latin]);
    }
}
