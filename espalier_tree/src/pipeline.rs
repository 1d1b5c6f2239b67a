// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The update passes around layout: fades, timers, opacity, host hooks.

use alloc::vec::Vec;
use smallvec::SmallVec;

use espalier_event_state::interaction::InteractionState;

use crate::tree::Tree;
use crate::types::{NodeId, Slot};

/// Per-frame inputs to [`Tree::update`].
///
/// `hot`/`pressed`/`focused` are the desktop-held pointers feeding each
/// node's interaction state; `style_opacity` resolves a style key plus that
/// state to an opacity multiplier, keeping the tree independent of any
/// particular skin representation.
pub struct UpdateEnv<'a> {
    /// Frame time since the previous update, in milliseconds.
    pub elapsed_ms: u64,
    /// Node currently under the pointer, if any.
    pub hot: Option<NodeId>,
    /// Node currently held by a pointer button, if any.
    pub pressed: Option<NodeId>,
    /// Node currently owning keyboard focus, if any.
    pub focused: Option<NodeId>,
    /// Style-driven opacity source.
    pub style_opacity: Option<&'a dyn Fn(Option<&str>, InteractionState) -> f64>,
}

impl core::fmt::Debug for UpdateEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UpdateEnv")
            .field("elapsed_ms", &self.elapsed_ms)
            .field("hot", &self.hot)
            .field("pressed", &self.pressed)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl UpdateEnv<'_> {
    /// A frame advancing by `elapsed_ms` with no pointer or focus inputs.
    pub fn new(elapsed_ms: u64) -> Self {
        Self {
            elapsed_ms,
            hot: None,
            pressed: None,
            focused: None,
            style_opacity: None,
        }
    }
}

/// Host callback visited once per live node during the update passes.
pub type NodeHook<'a> = &'a mut dyn FnMut(&mut Tree, NodeId);

impl Tree {
    /// Run the update pass over the subtree rooted at `root`.
    ///
    /// Per node: advance the opacity fade, drain timers that came due (see
    /// [`Tree::take_fired_timers`]), compute effective opacity, invoke
    /// `hook`, then recurse cosmetic children before logical ones. Both
    /// collections stay locked from just before the hook until the level's
    /// recursion finishes, so structural changes made by hooks are deferred
    /// and committed at that level's cleanup on the way out.
    pub fn update(&mut self, root: NodeId, env: &UpdateEnv<'_>, hook: NodeHook<'_>) {
        if !self.is_alive(root) {
            return;
        }
        self.update_node(root, 1.0, env, hook);
    }

    fn update_node(
        &mut self,
        id: NodeId,
        parent_opacity: f64,
        env: &UpdateEnv<'_>,
        hook: NodeHook<'_>,
    ) {
        #[allow(
            clippy::cast_precision_loss,
            reason = "frame deltas are far below 2^52 ms"
        )]
        let dt = env.elapsed_ms as f64;

        let mut fired: SmallVec<[u32; 2]> = SmallVec::new();
        {
            let n = self.node_mut(id);
            if let Some(fade) = n.fade {
                let step = fade.speed * dt / 1000.0;
                let gap = fade.target - n.opacity;
                if gap.abs() <= step {
                    n.opacity = fade.target;
                    n.fade = None;
                } else if gap < 0.0 {
                    n.opacity -= step;
                } else {
                    n.opacity += step;
                }
            }
            n.timers.retain(|t| {
                t.remaining_ms -= dt;
                if t.remaining_ms <= 0.0 {
                    fired.push(t.tag);
                    false
                } else {
                    true
                }
            });
        }
        for tag in fired {
            self.fired_timers.push((id, tag));
        }

        let state = self
            .interaction_state(
                id,
                env.hot == Some(id),
                env.pressed == Some(id),
                env.focused == Some(id),
            )
            .unwrap_or_default();
        let style_opacity = match env.style_opacity {
            Some(resolve) => resolve(self.style(id), state),
            None => 1.0,
        };
        let own = self.opacity(id).unwrap_or(1.0);
        let effective = (parent_opacity * style_opacity * own).clamp(0.0, 1.0);
        self.node_mut(id).effective_opacity = effective;

        self.lock_children(id);
        hook(self, id);
        let cosmetic: Vec<NodeId> = self.children(id, Slot::Cosmetic).to_vec();
        let logical: Vec<NodeId> = self.children(id, Slot::Logical).to_vec();
        for child in cosmetic {
            if self.owner_of(child) == Some((id, Slot::Cosmetic)) {
                self.update_node(child, effective, env, &mut *hook);
            }
        }
        for child in logical {
            if self.owner_of(child) == Some((id, Slot::Logical)) {
                self.update_node(child, effective, env, &mut *hook);
            }
        }
        self.unlock_children(id);
        self.cleanup_children(id);
    }

    /// Run the post-layout pass: `hook` sees final screen rectangles.
    ///
    /// Same traversal and lock discipline as [`Tree::update`], with no fade,
    /// timer, or opacity work.
    pub fn late_update(&mut self, root: NodeId, hook: NodeHook<'_>) {
        if !self.is_alive(root) {
            return;
        }
        self.late_update_node(root, hook);
    }

    fn late_update_node(&mut self, id: NodeId, hook: NodeHook<'_>) {
        self.lock_children(id);
        hook(self, id);
        let cosmetic: Vec<NodeId> = self.children(id, Slot::Cosmetic).to_vec();
        let logical: Vec<NodeId> = self.children(id, Slot::Logical).to_vec();
        for child in cosmetic {
            if self.owner_of(child) == Some((id, Slot::Cosmetic)) {
                self.late_update_node(child, &mut *hook);
            }
        }
        for child in logical {
            if self.owner_of(child) == Some((id, Slot::Logical)) {
                self.late_update_node(child, &mut *hook);
            }
        }
        self.unlock_children(id);
        self.cleanup_children(id);
    }
}
