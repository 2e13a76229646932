use std::rc::Rc;

use gloo::console::log;
use gloo::timers::callback::Timeout;
use policygrid_core::config::ClientConfig;
use policygrid_core::datasource::{
  RowBlockLoad,
  RowBlockSource
};
use policygrid_core::grid::GridState;
use policygrid_core::search_box::on_search_change;
use policygrid_core::stats::{
  StatsState,
  fetch_stats
};
use policygrid_core::status_filter::{
  StatusFilterController,
  StatusSelection
};
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_mut_ref,
  use_reducer,
  use_state
};

use crate::api::BrowserApi;
use crate::components::{
  Pager,
  PolicyTable,
  SearchBox,
  StatusBar
};

const CLIENT_CONFIG_TOML: &str =
  include_str!("../assets/policygrid.toml");

/// Grid plus the controller state that writes into its filter model.
#[derive(Clone, PartialEq)]
struct GridModel {
  grid:   GridState,
  status: StatusFilterController
}

impl GridModel {
  fn new(page_size: u64) -> Self {
    Self {
      grid:   GridState::new(page_size),
      status: StatusFilterController::new()
    }
  }
}

enum GridAction {
  SelectStatus(StatusSelection),
  Search(String),
  ToggleSort(String),
  SetPage(u64),
  SetPageSize(u64),
  Loaded(RowBlockLoad)
}

impl Reducible for GridModel {
  type Action = GridAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();

    match action {
      | GridAction::SelectStatus(
        selection
      ) => {
        next.status.select_status(
          &mut next.grid,
          selection
        );
      }
      | GridAction::Search(text) => {
        on_search_change(
          &mut next.grid,
          &text
        );
      }
      | GridAction::ToggleSort(col_id) => {
        next.grid.toggle_sort(&col_id);
      }
      | GridAction::SetPage(page) => {
        next.grid.set_page(page);
      }
      | GridAction::SetPageSize(size) => {
        next.grid.set_page_size(size);
      }
      | GridAction::Loaded(load) => {
        if !next.grid.apply_load(load) {
          return self;
        }
      }
    }

    Rc::new(next)
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_memo((), |_| load_client_config());
  let source = {
    let config = config.clone();
    use_memo((), move |_| {
      RowBlockSource::new(
        BrowserApi::new(
          &config.api_base_url
        ),
        config.tenant()
      )
    })
  };
  let stats =
    use_state(StatsState::default);
  let model = {
    let page_size = config.page_size;
    use_reducer(move || {
      GridModel::new(page_size)
    })
  };
  let search_timer =
    use_mut_ref(|| None::<Timeout>);

  {
    let stats = stats.clone();
    let source = source.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "requesting line of business \
         stats"
      );
      wasm_bindgen_futures::spawn_local(
        async move {
          let state =
            fetch_stats(source.api()).await;
          stats.set(state);
        }
      );
      || ()
    });
  }

  {
    let source = source.clone();
    let request =
      model.grid.row_block_request();
    let dispatcher = model.dispatcher();
    use_effect_with(
      model.grid.generation(),
      move |generation| {
        let generation = *generation;
        tracing::debug!(
          generation,
          start = ?request.start_row,
          end = ?request.end_row,
          "requesting row block"
        );
        wasm_bindgen_futures::spawn_local(
          async move {
            let load = source
              .get_rows(&request, generation)
              .await;
            dispatcher.dispatch(
              GridAction::Loaded(load)
            );
          }
        );
        || ()
      }
    );
  }

  let on_select_status = {
    let dispatcher = model.dispatcher();
    Callback::from(
      move |selection: StatusSelection| {
        ui_debug(
          "status.select",
          selection.as_str()
        );
        dispatcher.dispatch(
          GridAction::SelectStatus(
            selection
          )
        );
      }
    )
  };

  let on_search = {
    let dispatcher = model.dispatcher();
    let search_timer =
      search_timer.clone();
    let debounce_ms =
      config.search_debounce_ms;
    Callback::from(move |text: String| {
      if debounce_ms == 0 {
        dispatcher.dispatch(
          GridAction::Search(text)
        );
        return;
      }

      let dispatcher = dispatcher.clone();
      // replacing the handle cancels the pending keystroke
      *search_timer.borrow_mut() =
        Some(Timeout::new(
          debounce_ms,
          move || {
            dispatcher.dispatch(
              GridAction::Search(text)
            );
          }
        ));
    })
  };

  let on_sort = {
    let dispatcher = model.dispatcher();
    Callback::from(move |col_id: String| {
      dispatcher.dispatch(
        GridAction::ToggleSort(col_id)
      );
    })
  };

  let on_page = {
    let dispatcher = model.dispatcher();
    Callback::from(move |page: u64| {
      dispatcher
        .dispatch(GridAction::SetPage(page));
    })
  };

  let on_page_size = {
    let dispatcher = model.dispatcher();
    Callback::from(move |size: u64| {
      dispatcher.dispatch(
        GridAction::SetPageSize(size)
      );
    })
  };

  let grid = &model.grid;

  html! {
      <div class="app-shell">
          <div class="grid-container">
              <SearchBox on_change={on_search} />
              <StatusBar
                  stats={(*stats).clone()}
                  controller={model.status.clone()}
                  on_select={on_select_status}
              />
              <PolicyTable
                  rows={grid.rows().to_vec()}
                  sort_model={grid.sort_model().to_vec()}
                  loading={grid.is_loading()}
                  error={grid.last_error().map(str::to_string)}
                  {on_sort}
              />
              <Pager
                  page={grid.page()}
                  page_count={grid.page_count()}
                  page_size={grid.page_size()}
                  range_label={grid.row_range_label()}
                  {on_page}
                  {on_page_size}
              />
          </div>
      </div>
  }
}

fn load_client_config() -> ClientConfig {
  match toml::from_str::<ClientConfig>(
    CLIENT_CONFIG_TOML
  ) {
    | Ok(config) => {
      if let Err(err) = config.validate() {
        tracing::warn!(error = %err, "bundled client config invalid; using defaults");
        return ClientConfig::default();
      }
      tracing::debug!(
        api = %config.api_base_url,
        page_size = config.page_size,
        "loaded bundled client config"
      );
      config
    }
    | Err(err) => {
      tracing::warn!(error = %err, "failed to parse bundled client config; using defaults");
      ClientConfig::default()
    }
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
