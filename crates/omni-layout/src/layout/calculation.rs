//! Slot-to-rect computation.

use omni_common::types::{Rect, Size};
use omni_common::TabId;

use super::{Bands, LayoutEngine, LayoutMode, LayoutPlan, Placement};
use crate::slots::Slots;

impl LayoutEngine {
    pub fn new(header: u32, footer: u32) -> Self {
        Self {
            bands: Bands { header, footer },
        }
    }

    /// Window area below the header band and above the footer band.
    pub fn usable(&self, window: Size) -> Rect {
        let height = window
            .height
            .saturating_sub(self.bands.header)
            .saturating_sub(self.bands.footer);
        Rect::new(0, self.bands.header, window.width, height)
    }

    pub fn compute(&self, mode: LayoutMode, slots: &Slots, window: Size) -> Vec<Placement> {
        let area = self.usable(window);
        let mut out = Vec::with_capacity(2);

        match mode {
            LayoutMode::Single => {
                if let Some(primary) = &slots.primary {
                    out.push(Placement {
                        id: primary.clone(),
                        rect: area,
                    });
                }
            }
            LayoutMode::Split => {
                let left = area.width / 2;
                let right = area.width - left;
                if let Some(primary) = &slots.primary {
                    out.push(Placement {
                        id: primary.clone(),
                        rect: Rect::new(area.x, area.y, left, area.height),
                    });
                }
                if let Some(secondary) = &slots.secondary {
                    if slots.primary.as_ref() != Some(secondary) {
                        out.push(Placement {
                            id: secondary.clone(),
                            rect: Rect::new(area.x + left, area.y, right, area.height),
                        });
                    }
                }
            }
        }
        out
    }

    /// Full reconcile: detach every attached context, then attach the
    /// computed placements.
    pub fn plan(
        &self,
        mode: LayoutMode,
        slots: &Slots,
        window: Size,
        attached: &[TabId],
    ) -> LayoutPlan {
        let plan = LayoutPlan {
            detach: attached.to_vec(),
            attach: self.compute(mode, slots, window),
        };
        tracing::debug!(
            ?mode,
            detach = plan.detach.len(),
            attach = plan.attach.len(),
            "layout planned"
        );
        plan
    }
}
