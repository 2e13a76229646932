use policygrid_core::columns::{
  ColumnFilter,
  cell_text,
  visible_columns
};
use policygrid_core::query::SortModelItem;
use policygrid_shared::{
  GridRow,
  SortDirection
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
pub struct PolicyTableProps {
  pub rows:       Vec<GridRow>,
  pub sort_model: Vec<SortModelItem>,
  pub loading:    bool,
  pub error:      Option<String>,
  pub on_sort:    Callback<String>
}

#[function_component(PolicyTable)]
pub fn policy_table(
  props: &PolicyTableProps
) -> Html {
  let columns =
    visible_columns().collect::<Vec<_>>();
  let span = columns.len().to_string();

  let body = if let Some(error) =
    props.error.as_ref()
  {
    html! {
        <tr><td class="overlay error" colspan={span}>
            { format!("Failed to load rows: {error}") }
        </td></tr>
    }
  } else if props.rows.is_empty() {
    let text = if props.loading {
      "Loading..."
    } else {
      "No Rows To Show"
    };
    html! {
        <tr><td class="overlay" colspan={span}>{ text }</td></tr>
    }
  } else {
    html! {
        <>
            {
                for props.rows.iter().map(|row| html! {
                    <tr key={row.id.clone()}>
                        {
                            for columns.iter().map(|column| html! {
                                <td>{ cell_text(row, column.field) }</td>
                            })
                        }
                    </tr>
                })
            }
        </>
    }
  };

  html! {
      <div class="table-wrap">
          <table class={classes!("policy-table", props.loading.then_some("loading"))}>
              <thead>
                  <tr>
                      {
                          for columns.iter().map(|column| {
                              let field = column.field.to_string();
                              let on_sort = props.on_sort.clone();
                              let sortable = column.sortable;
                              let filterable =
                                  column.filter != ColumnFilter::None;
                              let indicator = props
                                  .sort_model
                                  .iter()
                                  .find(|item| item.col_id == column.field)
                                  .map(|item| match item.sort {
                                      | SortDirection::Asc => " ▲",
                                      | SortDirection::Desc => " ▼"
                                  })
                                  .unwrap_or_default();
                              html! {
                                  <th
                                      class={classes!(
                                          sortable.then_some("sortable"),
                                          filterable.then_some("filterable")
                                      )}
                                      style={format!("min-width: {}px", column.min_width)}
                                      onclick={move |_| {
                                          if sortable {
                                              on_sort.emit(field.clone());
                                          }
                                      }}
                                  >
                                      { column.header_name }
                                      { indicator }
                                  </th>
                              }
                          })
                      }
                  </tr>
              </thead>
              <tbody>{ body }</tbody>
          </table>
      </div>
  }
}
