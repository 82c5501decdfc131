//! The two dashboard compositions and the switch between them.
//!
//! Detail and edit are separate component trees. A mode change drops the
//! mounted view (stopping its tile watchers) and mounts the other one from
//! scratch, so grid geometry and tile state are always rebuilt.

mod board;
mod detail;
mod edit;

pub use detail::DetailView;
pub use edit::EditView;

use homedash_core::{Dashboard, DashboardMode};

use crate::component::Component;
use crate::data_bridge::TileContext;

pub enum DashboardView {
    Detail(DetailView),
    Edit(EditView),
}

impl DashboardView {
    pub fn mount(mode: DashboardMode, dashboard: &Dashboard, ctx: &TileContext) -> Self {
        match mode {
            DashboardMode::Detail => Self::Detail(DetailView::mount(dashboard, ctx.clone())),
            DashboardMode::Edit => Self::Edit(EditView::mount(dashboard.clone(), ctx.clone())),
        }
    }

    pub fn mode(&self) -> DashboardMode {
        match self {
            Self::Detail(_) => DashboardMode::Detail,
            Self::Edit(_) => DashboardMode::Edit,
        }
    }

    pub fn component(&self) -> &dyn Component {
        match self {
            Self::Detail(view) => view as &dyn Component,
            Self::Edit(view) => view,
        }
    }

    pub fn component_mut(&mut self) -> &mut dyn Component {
        match self {
            Self::Detail(view) => view as &mut dyn Component,
            Self::Edit(view) => view,
        }
    }
}
