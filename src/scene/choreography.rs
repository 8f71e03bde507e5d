//! Phase tables for every scene transition.
//!
//! A choreography is a list of [`Phase`]s run strictly one after another. Within a phase every
//! tween starts together (optionally offset by its own delay) and the phase ends when all of
//! them have settled.

use crate::animation::ease::Ease;
use crate::config::ChoreographyOpts;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::Rng64;
use crate::layout::diff::{VANISH_SCALE, vanished};
use crate::layout::{
    EdgeDescriptor, LayoutResult, NodeDescriptor, TransitionPlan, diff_click_transition,
    diff_layouts,
};
use crate::render::node::NodePatch;
use crate::scene::SceneId;

/// Which choreography a transition runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Choreography {
    /// Replace everything at once.
    Direct,
    /// Single enter/exit/move morph.
    SoftDiff,
    /// Fade everything out, swap, fade everything in.
    FadeSwap,
    /// Collapse, promote the clicked node, stagger satellites in.
    Focus,
    /// Scatter satellites, promote the clicked one, restagger.
    Refocus,
}

impl Choreography {
    /// Transition table.
    ///
    /// | from | to | clicked | choreography |
    /// |---|---|---|---|
    /// | none | any | - | `Direct` |
    /// | home | home | - | `SoftDiff` |
    /// | detail | home | - | `FadeSwap` |
    /// | home | detail | yes | `Focus` |
    /// | detail | detail | yes | `Refocus` |
    /// | any | detail | no | `SoftDiff` |
    pub fn select(from: SceneId, to: SceneId, clicked: bool) -> Self {
        match (from, to) {
            (SceneId::None, _) | (_, SceneId::None) => Self::Direct,
            (SceneId::Home, SceneId::Home) => Self::SoftDiff,
            (_, SceneId::Home) => Self::FadeSwap,
            (SceneId::Home, _) if clicked => Self::Focus,
            (_, _) if clicked => Self::Refocus,
            _ => Self::SoftDiff,
        }
    }

    /// Phase names, in order.
    pub fn phase_names(self) -> &'static [&'static str] {
        match self {
            Self::Direct => &["set"],
            Self::SoftDiff => &["morph"],
            Self::FadeSwap => &["fade-out", "fade-in"],
            Self::Focus => &["collapse", "promote", "stagger"],
            Self::Refocus => &["scatter", "promote", "restagger"],
        }
    }
}

/// One tween started when its phase begins.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTween {
    /// Node id at the time the phase starts.
    pub id: String,
    /// Target values.
    pub target: NodePatch,
    /// Easing curve.
    pub ease: Ease,
    /// Offset from the phase start.
    pub delay_ms: f64,
}

/// One step of a choreography.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Phase {
    /// Name from [`Choreography::phase_names`].
    pub name: &'static str,
    /// Duration of each tween in the phase.
    pub duration_ms: f64,
    /// Nodes upserted with these exact values before any tween starts.
    pub spawn: Vec<NodeDescriptor>,
    /// Edge list installed when the phase starts.
    pub edges_at_start: Option<Vec<EdgeDescriptor>>,
    /// Tweens started with the phase.
    pub tweens: Vec<PhaseTween>,
    /// Nodes removed once every tween settled.
    pub remove_at_end: Vec<String>,
    /// `(old, new)` re-keys applied once every tween settled.
    pub rekey_at_end: Vec<(String, String)>,
}

/// Inputs shared by every phase builder.
#[derive(Clone, Copy, Debug)]
pub struct PlanInput<'a> {
    /// Layout currently on screen.
    pub old: &'a LayoutResult,
    /// Layout to reach.
    pub new: &'a LayoutResult,
    /// Clicked node id, if the request came from a click.
    pub clicked: Option<&'a str>,
    /// Durations.
    pub opts: &'a ChoreographyOpts,
    /// Enter jitter amplitude.
    pub jitter: f64,
}

/// Build the phase list for `kind`.
///
/// Returns `None` when a click choreography cannot be planned (no clicked node, clicked node
/// not on screen, or no center in the new layout); callers fall back to `SoftDiff`.
pub fn build_phases(kind: Choreography, input: PlanInput<'_>, rng: &mut Rng64) -> Option<Vec<Phase>> {
    match kind {
        Choreography::Direct => Some(direct(input)),
        Choreography::SoftDiff => Some(soft_diff(input)),
        Choreography::FadeSwap => Some(fade_swap(input)),
        Choreography::Focus => focus(input, rng),
        Choreography::Refocus => refocus(input, rng),
    }
}

fn direct(input: PlanInput<'_>) -> Vec<Phase> {
    vec![snap_phase(input.old, input.new)]
}

/// Tween-free phase that jumps from `old` straight to `new`.
pub(crate) fn snap_phase(old: &LayoutResult, new: &LayoutResult) -> Phase {
    Phase {
        name: "set",
        duration_ms: 0.0,
        spawn: new.nodes.clone(),
        edges_at_start: Some(new.edges.clone()),
        remove_at_end: old
            .nodes
            .iter()
            .filter(|n| new.node(&n.id).is_none())
            .map(|n| n.id.clone())
            .collect(),
        ..Phase::default()
    }
}

fn exit_tween(n: &NodeDescriptor, ease: Ease) -> PhaseTween {
    PhaseTween {
        id: n.id.clone(),
        target: NodePatch::numeric_from(&vanished(n)),
        ease,
        delay_ms: 0.0,
    }
}

fn settle_tween(n: &NodeDescriptor, ease: Ease, delay_ms: f64) -> PhaseTween {
    PhaseTween {
        id: n.id.clone(),
        target: NodePatch::from_descriptor(n),
        ease,
        delay_ms,
    }
}

fn soft_diff(input: PlanInput<'_>) -> Vec<Phase> {
    let plan = diff_layouts(input.old, input.new);
    let mut phase = Phase {
        name: "morph",
        duration_ms: input.opts.ms(input.opts.soft_fraction),
        edges_at_start: Some(input.new.edges.clone()),
        ..Phase::default()
    };
    for t in &plan.exit {
        phase.tweens.push(exit_tween(&t.from, Ease::InCubic));
        phase.remove_at_end.push(t.id.clone());
    }
    for t in &plan.enter {
        phase.spawn.push(t.from.clone());
        phase.tweens.push(settle_tween(&t.to, Ease::OutCubic, 0.0));
    }
    for t in plan.moved.iter().chain(&plan.stay) {
        phase.tweens.push(settle_tween(&t.to, Ease::InOutCubic, 0.0));
    }
    vec![phase]
}

fn fade_swap(input: PlanInput<'_>) -> Vec<Phase> {
    let d = input.opts.ms(input.opts.fade_fraction);
    let out = Phase {
        name: "fade-out",
        duration_ms: d,
        tweens: input
            .old
            .nodes
            .iter()
            .map(|n| exit_tween(n, Ease::InQuad))
            .collect(),
        remove_at_end: input.old.nodes.iter().map(|n| n.id.clone()).collect(),
        ..Phase::default()
    };
    let fade_in = Phase {
        name: "fade-in",
        duration_ms: d,
        spawn: input.new.nodes.iter().map(vanished).collect(),
        edges_at_start: Some(input.new.edges.clone()),
        tweens: input
            .new
            .nodes
            .iter()
            .map(|n| settle_tween(n, Ease::OutQuad, 0.0))
            .collect(),
        ..Phase::default()
    };
    vec![out, fade_in]
}

fn click_plan(input: PlanInput<'_>, rng: &mut Rng64) -> Option<(String, TransitionPlan)> {
    let clicked = input.clicked?;
    let plan = diff_click_transition(clicked, input.old, input.new, input.jitter, rng)?;
    Some((clicked.to_owned(), plan))
}

/// Promote phase shared by both click choreographies.
fn promote(clicked: &str, plan: &TransitionPlan, duration_ms: f64) -> Option<Phase> {
    let center = plan.moved.first()?;
    let mut phase = Phase {
        name: "promote",
        duration_ms,
        tweens: vec![PhaseTween {
            id: clicked.to_owned(),
            target: NodePatch::from_descriptor(&center.to),
            ease: Ease::InOutCubic,
            delay_ms: 0.0,
        }],
        ..Phase::default()
    };
    if center.id != clicked {
        phase.rekey_at_end.push((clicked.to_owned(), center.id.clone()));
    }
    Some(phase)
}

fn stagger(name: &'static str, plan: &TransitionPlan, new: &LayoutResult, duration_ms: f64, step_ms: f64, outward: bool) -> Phase {
    let mut enter: Vec<_> = plan.enter.iter().collect();
    if outward && let Some(c) = new.center() {
        let origin = c.pos();
        enter.sort_by(|a, b| {
            let da = (a.to.pos() - origin).hypot();
            let db = (b.to.pos() - origin).hypot();
            da.total_cmp(&db)
        });
    }
    Phase {
        name,
        duration_ms,
        spawn: enter.iter().map(|t| t.from.clone()).collect(),
        edges_at_start: Some(new.edges.clone()),
        tweens: enter
            .iter()
            .enumerate()
            .map(|(i, t)| settle_tween(&t.to, Ease::OutBack, i as f64 * step_ms))
            .collect(),
        ..Phase::default()
    }
}

fn focus(input: PlanInput<'_>, rng: &mut Rng64) -> Option<Vec<Phase>> {
    let (clicked, plan) = click_plan(input, rng)?;
    let o = input.opts;
    let collapse = Phase {
        name: "collapse",
        duration_ms: o.ms(o.collapse_fraction),
        edges_at_start: Some(Vec::new()),
        tweens: plan
            .exit
            .iter()
            .map(|t| exit_tween(&t.from, Ease::InCubic))
            .collect(),
        remove_at_end: plan.exit.iter().map(|t| t.id.clone()).collect(),
        ..Phase::default()
    };
    let promote = promote(&clicked, &plan, o.ms(o.promote_fraction))?;
    let stagger = stagger(
        "stagger",
        &plan,
        input.new,
        o.ms(o.stagger_fraction),
        o.stagger_delay_ms,
        false,
    );
    Some(vec![collapse, promote, stagger])
}

fn refocus(input: PlanInput<'_>, rng: &mut Rng64) -> Option<Vec<Phase>> {
    let (clicked, plan) = click_plan(input, rng)?;
    let o = input.opts;
    let mut scatter = Phase {
        name: "scatter",
        duration_ms: o.ms(o.scatter_fraction),
        edges_at_start: Some(Vec::new()),
        ..Phase::default()
    };
    for t in &plan.exit {
        let angle = rng.angle();
        let to: Point = t.from.pos() + Vec2::new(angle.cos(), angle.sin()) * o.scatter_distance;
        scatter.tweens.push(PhaseTween {
            id: t.id.clone(),
            target: NodePatch {
                scale: Some(t.from.scale * VANISH_SCALE),
                opacity: Some(0.0),
                ..NodePatch::default().at(to.x, to.y)
            },
            ease: Ease::InQuad,
            delay_ms: 0.0,
        });
        scatter.remove_at_end.push(t.id.clone());
    }
    let promote = promote(&clicked, &plan, o.ms(o.promote_fraction))?;
    let restagger = stagger(
        "restagger",
        &plan,
        input.new,
        o.ms(o.restagger_fraction),
        o.restagger_delay_ms,
        true,
    );
    Some(vec![scatter, promote, restagger])
}

#[cfg(test)]
#[path = "../../tests/unit/scene/choreography.rs"]
mod tests;
