use policygrid_core::stats::StatsState;
use policygrid_core::status_filter::{
  StatusFilterController,
  StatusSelection
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatusBarProps {
  pub stats:      StatsState,
  pub controller: StatusFilterController,
  pub on_select:  Callback<StatusSelection>
}

#[function_component(StatusBar)]
pub fn status_bar(
  props: &StatusBarProps
) -> Html {
  let on_select_all =
    props.on_select.clone();
  let all_selected = props
    .controller
    .is_selected(&StatusSelection::All);

  let hint = if props.stats.is_pending() {
    html! {
        <span class="status-hint">{ "loading counts…" }</span>
    }
  } else if let Some(error) =
    props.stats.error()
  {
    html! {
        <span class="status-hint error" title={error.to_string()}>
            { "counts unavailable" }
        </span>
    }
  } else {
    html! {}
  };

  html! {
      <div class="status-container">
          <div
              class={classes!("status-item", all_selected.then_some("selected"))}
              onclick={move |_| on_select_all.emit(StatusSelection::All)}
          >
              <p class="status-count">{ props.stats.total_count() }</p>
              <p class="status-name">{ "All" }</p>
          </div>
          {
              for props.stats.statuses().iter().map(|status| {
                  let selection = StatusSelection::Status(status.id.clone());
                  let is_selected = props.controller.is_selected(&selection);
                  let on_select = props.on_select.clone();
                  html! {
                      <div
                          key={status.id.as_str().to_string()}
                          class={classes!("status-item", is_selected.then_some("selected"))}
                          onclick={move |_| on_select.emit(selection.clone())}
                      >
                          <p class="status-count">{ status.count }</p>
                          <p class="status-name">{ status.display_name() }</p>
                      </div>
                  }
              })
          }
          { hint }
      </div>
  }
}
