pub mod bar_chart;
pub mod genre_select;
pub mod influence_graph;
pub mod scale;
pub mod tooltip;
pub mod transition;
