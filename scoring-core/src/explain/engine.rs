//! Attribution Engine - Exact Shapley Values for Tree Ensembles
//!
//! For each tree, the contribution of a feature is the change in the
//! expected leaf value from revealing that feature, averaged over all
//! orders of revealing the others. Enumerating orders is combinatorially
//! infeasible, so the engine walks every root-to-leaf path once while
//! maintaining, per unique feature on the path, the fraction of paths
//! that flow through when the feature is unknown (`zero_fraction`, from
//! node cover weights) and when it is known (`one_fraction`). The
//! permutation weights are carried incrementally in `pweight`.
//!
//! Trees whose nodes lack cover weights cannot be attributed exactly;
//! they are skipped and the report is flagged partial.

use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::model::forest::{DecisionTree, Ensemble, Node};

// ============================================================================
// ERRORS & REPORT
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AttributionError {
    #[error("node {node} carries no usable cover weight")]
    MissingCover { node: usize },
}

/// Attribution output for one prediction
#[derive(Debug, Clone)]
pub struct AttributionReport {
    /// Signed contribution per feature, in layout order
    pub contributions: [f64; FEATURE_COUNT],
    /// Base score plus the cover-weighted expected value of every
    /// attributed tree; `expected_value + sum(contributions)` equals the
    /// margin when `partial` is false.
    pub expected_value: f64,
    /// Trees omitted for lack of cover weights
    pub trees_skipped: usize,
    pub partial: bool,
}

// ============================================================================
// ENSEMBLE DRIVER
// ============================================================================

/// Attribute the ensemble's margin for `features`. Never fails for a
/// structurally valid ensemble; trees without covers degrade the report
/// to partial instead.
pub fn explain(ensemble: &Ensemble, features: &FeatureVector) -> AttributionReport {
    let mut contributions = [0.0; FEATURE_COUNT];
    let mut expected_value = ensemble.base_score();
    let mut trees_skipped = 0;

    for (index, tree) in ensemble.trees().iter().enumerate() {
        match tree_contributions(tree, features.as_array()) {
            Ok((phi, expected)) => {
                for (total, part) in contributions.iter_mut().zip(phi.iter()) {
                    *total += part;
                }
                expected_value += expected;
            }
            Err(err) => {
                log::warn!("tree {} omitted from attribution: {}", index, err);
                trees_skipped += 1;
            }
        }
    }

    AttributionReport {
        contributions,
        expected_value,
        trees_skipped,
        partial: trees_skipped > 0,
    }
}

// ============================================================================
// PER-TREE TRAVERSAL
// ============================================================================

/// One unique feature on the current decision path
#[derive(Debug, Clone, Copy)]
struct PathElement {
    /// Feature index, or -1 for the synthetic root element
    feature: isize,
    /// Fraction of the population that follows the path when the
    /// feature is unknown
    zero_fraction: f64,
    /// 1.0 while the observed value follows the path, else 0.0
    one_fraction: f64,
    /// Permutation weight accumulated for this subset size
    pweight: f64,
}

/// Exact contributions and expected value for one tree.
fn tree_contributions(
    tree: &DecisionTree,
    x: &[f64; FEATURE_COUNT],
) -> Result<([f64; FEATURE_COUNT], f64), AttributionError> {
    // Pre-check covers so the traversal itself cannot fail midway.
    for (index, node) in tree.nodes.iter().enumerate() {
        let usable = node
            .cover()
            .map(|c| c > 0.0 && c.is_finite())
            .unwrap_or(false);
        if !usable {
            return Err(AttributionError::MissingCover { node: index });
        }
    }

    let expected = expected_value(tree, 0);
    let mut phi = [0.0; FEATURE_COUNT];
    recurse(tree, x, &mut phi, 0, Vec::new(), 1.0, 1.0, -1);
    Ok((phi, expected))
}

/// Cover-weighted mean leaf value below `node`. Children weights are
/// normalized by their own sum so inference and attribution agree even
/// when a parent's recorded cover drifts from its children's total.
fn expected_value(tree: &DecisionTree, node: usize) -> f64 {
    match &tree.nodes[node] {
        Node::Leaf { value, .. } => *value,
        Node::Split { left, right, .. } => {
            let left_cover = cover_of(tree, *left);
            let right_cover = cover_of(tree, *right);
            (left_cover * expected_value(tree, *left)
                + right_cover * expected_value(tree, *right))
                / (left_cover + right_cover)
        }
    }
}

/// Cover of a node. Callers run after the pre-check in
/// `tree_contributions`, so the weight is present and positive.
fn cover_of(tree: &DecisionTree, node: usize) -> f64 {
    tree.nodes[node].cover().unwrap_or(0.0)
}

#[allow(clippy::too_many_arguments)]
fn recurse(
    tree: &DecisionTree,
    x: &[f64; FEATURE_COUNT],
    phi: &mut [f64; FEATURE_COUNT],
    node: usize,
    mut path: Vec<PathElement>,
    zero_fraction: f64,
    one_fraction: f64,
    feature: isize,
) {
    extend(&mut path, zero_fraction, one_fraction, feature);

    match &tree.nodes[node] {
        Node::Leaf { value, .. } => {
            for i in 1..path.len() {
                let weight = unwound_sum(&path, i);
                let element = path[i];
                phi[element.feature as usize] +=
                    weight * (element.one_fraction - element.zero_fraction) * value;
            }
        }
        Node::Split {
            feature: split_feature,
            threshold,
            left,
            right,
            ..
        } => {
            let (hot, cold) = if x[*split_feature] < *threshold {
                (*left, *right)
            } else {
                (*right, *left)
            };

            let children_total = cover_of(tree, *left) + cover_of(tree, *right);
            let hot_zero_fraction = cover_of(tree, hot) / children_total;
            let cold_zero_fraction = cover_of(tree, cold) / children_total;

            // A feature met twice on one path keeps a single entry: undo
            // its previous extension and fold its fractions into the new one.
            let mut incoming_zero = 1.0;
            let mut incoming_one = 1.0;
            if let Some(k) =
                (1..path.len()).find(|&k| path[k].feature == *split_feature as isize)
            {
                incoming_zero = path[k].zero_fraction;
                incoming_one = path[k].one_fraction;
                unwind(&mut path, k);
            }

            recurse(
                tree,
                x,
                phi,
                hot,
                path.clone(),
                hot_zero_fraction * incoming_zero,
                incoming_one,
                *split_feature as isize,
            );
            recurse(
                tree,
                x,
                phi,
                cold,
                path,
                cold_zero_fraction * incoming_zero,
                0.0,
                *split_feature as isize,
            );
        }
    }
}

/// Grow the path by one unique feature, updating the permutation
/// weights for every subset size.
fn extend(path: &mut Vec<PathElement>, zero_fraction: f64, one_fraction: f64, feature: isize) {
    let depth = path.len();
    path.push(PathElement {
        feature,
        zero_fraction,
        one_fraction,
        pweight: if depth == 0 { 1.0 } else { 0.0 },
    });

    let d = depth as f64;
    for i in (0..depth).rev() {
        path[i + 1].pweight += one_fraction * path[i].pweight * (i as f64 + 1.0) / (d + 1.0);
        path[i].pweight = zero_fraction * path[i].pweight * (d - i as f64) / (d + 1.0);
    }
}

/// Exactly invert `extend` for the element at `index`, removing it.
fn unwind(path: &mut Vec<PathElement>, index: usize) {
    let depth = path.len() - 1;
    let one_fraction = path[index].one_fraction;
    let zero_fraction = path[index].zero_fraction;
    let d = depth as f64;

    let mut next_one_portion = path[depth].pweight;
    for i in (0..depth).rev() {
        if one_fraction != 0.0 {
            let tmp = path[i].pweight;
            path[i].pweight = next_one_portion * (d + 1.0) / ((i as f64 + 1.0) * one_fraction);
            next_one_portion =
                tmp - path[i].pweight * zero_fraction * (d - i as f64) / (d + 1.0);
        } else {
            path[i].pweight = path[i].pweight * (d + 1.0) / (zero_fraction * (d - i as f64));
        }
    }

    for i in index..depth {
        path[i].feature = path[i + 1].feature;
        path[i].zero_fraction = path[i + 1].zero_fraction;
        path[i].one_fraction = path[i + 1].one_fraction;
    }
    path.pop();
}

/// Total permutation weight the element at `index` would release if
/// unwound, without mutating the path.
fn unwound_sum(path: &[PathElement], index: usize) -> f64 {
    let depth = path.len() - 1;
    let one_fraction = path[index].one_fraction;
    let zero_fraction = path[index].zero_fraction;
    let d = depth as f64;

    let mut next_one_portion = path[depth].pweight;
    let mut total = 0.0;
    for i in (0..depth).rev() {
        if one_fraction != 0.0 {
            let tmp = next_one_portion * (d + 1.0) / ((i as f64 + 1.0) * one_fraction);
            total += tmp;
            next_one_portion =
                path[i].pweight - tmp * zero_fraction * (d - i as f64) / (d + 1.0);
        } else {
            total += path[i].pweight / zero_fraction * (d + 1.0) / (d - i as f64);
        }
    }
    total
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;
    use crate::model::forest::{DecisionTree, Ensemble, LinkFunction, Node};

    fn split(feature: usize, threshold: f64, left: usize, right: usize, cover: f64) -> Node {
        Node::Split {
            feature,
            threshold,
            left,
            right,
            cover: Some(cover),
        }
    }

    fn leaf(value: f64, cover: f64) -> Node {
        Node::Leaf {
            value,
            cover: Some(cover),
        }
    }

    fn https_tree() -> DecisionTree {
        // no-https (x4 < 0.5) -> 1.2, https -> -0.8; 60/40 population split
        DecisionTree {
            nodes: vec![
                split(4, 0.5, 1, 2, 100.0),
                leaf(1.2, 60.0),
                leaf(-0.8, 40.0),
            ],
        }
    }

    fn deep_tree() -> DecisionTree {
        // root splits on dot_count, children split on url_length / hyphen_count
        DecisionTree {
            nodes: vec![
                split(1, 3.0, 1, 2, 1000.0),
                split(0, 40.0, 3, 4, 700.0),
                split(2, 2.0, 5, 6, 300.0),
                leaf(-0.6, 500.0),
                leaf(0.3, 200.0),
                leaf(0.5, 120.0),
                leaf(1.4, 180.0),
            ],
        }
    }

    fn margin_of(tree: &DecisionTree, url: &str) -> f64 {
        tree.evaluate(&extract(url))
    }

    #[test]
    fn single_split_matches_hand_computation() {
        let tree = https_tree();
        let features = extract("https://a.com");
        let (phi, expected) = tree_contributions(&tree, features.as_array()).unwrap();

        // E[f] = 0.6 * 1.2 + 0.4 * (-0.8) = 0.4
        assert!((expected - 0.4).abs() < 1e-12);
        // Only has_https carries weight: phi = f(x) - E[f] = -0.8 - 0.4
        assert!((phi[4] - (-1.2)).abs() < 1e-12);
        for &other in &phi[..4] {
            assert!(other.abs() < 1e-12);
        }
    }

    #[test]
    fn contributions_sum_to_margin_minus_expected() {
        let tree = deep_tree();
        for url in [
            "https://www.google.com",
            "http://verify-amazon-login-secure.tk/confirm",
            "http://a.b.c.d.e-f-g.com/@path",
            "x",
        ] {
            let features = extract(url);
            let (phi, expected) = tree_contributions(&tree, features.as_array()).unwrap();
            let reconstructed = expected + phi.iter().sum::<f64>();
            assert!(
                (reconstructed - margin_of(&tree, url)).abs() < 1e-9,
                "invariant broke for {}",
                url
            );
        }
    }

    #[test]
    fn repeated_feature_on_one_path_is_handled() {
        // url_length tested twice along the left spine
        let tree = DecisionTree {
            nodes: vec![
                split(0, 50.0, 1, 2, 100.0),
                split(0, 20.0, 3, 4, 70.0),
                leaf(1.0, 30.0),
                leaf(-0.5, 40.0),
                leaf(0.2, 30.0),
            ],
        };
        for url in ["http://a.io", "http://this-is-a-much-longer-address.example.com", "https://x.y"] {
            let features = extract(url);
            let (phi, expected) = tree_contributions(&tree, features.as_array()).unwrap();
            let reconstructed = expected + phi.iter().sum::<f64>();
            assert!((reconstructed - margin_of(&tree, url)).abs() < 1e-9);
            // only feature 0 is ever split on
            for &other in &phi[1..] {
                assert!(other.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn ensemble_invariant_holds_across_trees() {
        let ensemble = Ensemble::new(
            vec![https_tree(), deep_tree()],
            -0.15,
            LinkFunction::Logistic,
        );
        let features = extract("http://login-verify.example.co.uk/account");
        let report = explain(&ensemble, &features);
        assert!(!report.partial);

        let margin = ensemble.predict(&features).margin;
        let reconstructed = report.expected_value + report.contributions.iter().sum::<f64>();
        assert!((reconstructed - margin).abs() < 1e-9);
    }

    #[test]
    fn missing_cover_skips_the_tree_and_flags_partial() {
        let no_cover = DecisionTree {
            nodes: vec![
                split(4, 0.5, 1, 2, 100.0),
                Node::Leaf {
                    value: 1.2,
                    cover: None,
                },
                leaf(-0.8, 40.0),
            ],
        };
        let ensemble = Ensemble::new(vec![https_tree(), no_cover], 0.0, LinkFunction::Logistic);
        let features = extract("https://a.com");
        let report = explain(&ensemble, &features);

        assert!(report.partial);
        assert_eq!(report.trees_skipped, 1);
        // the healthy tree's contribution is still exact
        assert!((report.contributions[4] - (-1.2)).abs() < 1e-12);
    }

    #[test]
    fn zero_cover_counts_as_missing() {
        let tree = DecisionTree {
            nodes: vec![split(4, 0.5, 1, 2, 100.0), leaf(1.2, 0.0), leaf(-0.8, 40.0)],
        };
        let err = tree_contributions(&tree, extract("http://a.com").as_array()).unwrap_err();
        assert!(matches!(err, AttributionError::MissingCover { node: 1 }));
    }
}
