//! Analyze page: stage two images, submit, and review the result.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns one `AnalysisWorkflow` in a local (non-`Send`) signal since
//! staged browser files are JS handles. Views read the workflow; only the
//! handlers below mutate it. The network exchange runs in `spawn_local` and
//! reports back through the submission ticket, so a result that arrives after
//! the inputs changed, or after the page was left, is dropped.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::components::deviation_table::DeviationTable;
use crate::components::result_summary::ResultSummary;
use crate::components::result_tabs::ResultTabs;
use crate::components::upload_card::{SlotPreview, UploadCard};
use crate::net::api::ApiConfig;
use crate::state::analysis::{AnalysisState, AnalysisWorkflow, Submission};
use crate::state::results::{ResultSummaryView, ResultTab, ReviewFlags, deviation_rows, show_deviation_table};
use crate::state::upload::{SelectedFile, SlotId};
use crate::util::preview::ObjectUrlPreviews;

type WorkflowSignal = RwSignal<AnalysisWorkflow<ObjectUrlPreviews>, LocalStorage>;

#[component]
pub fn AnalyzePage() -> impl IntoView {
    let api = expect_context::<ApiConfig>();
    let workflow: WorkflowSignal = RwSignal::new_local(AnalysisWorkflow::new(ObjectUrlPreviews));
    let tab = RwSignal::new(ResultTab::default());
    let flags = RwSignal::new(ReviewFlags::default());

    // Release slot previews when the page goes away.
    on_cleanup(move || {
        let _ = workflow.try_update(AnalysisWorkflow::reset);
    });

    let state = Memo::new(move |_| workflow.with(|w| w.state().clone()));
    let submit_enabled = move || workflow.with(AnalysisWorkflow::submit_enabled);
    let slot_preview = move |slot: SlotId| {
        Signal::derive(move || workflow.with(|w| w.staging().slot(slot).map(SlotPreview::from_slot)))
    };
    let stage = move |slot: SlotId| {
        Callback::new(move |files: Vec<SelectedFile>| {
            let accepted = workflow.try_update(|w| w.set_slot_from_selection(slot, files)).unwrap_or(false);
            if !accepted {
                log::info!("analyze: ignored selection for {} slot", slot.field_name());
            }
        })
    };

    let on_submit = Callback::new(move |()| {
        let Some(outcome) = workflow.try_update(AnalysisWorkflow::begin_submission) else {
            return;
        };
        let Submission { ticket, request } = match outcome {
            Ok(submission) => submission,
            Err(e) => {
                log::info!("analyze: submit ignored: {e}");
                return;
            }
        };
        flags.set(ReviewFlags::default());

        #[cfg(feature = "hydrate")]
        {
            use crate::net::analyze::{AnalysisSubmitter, BrowserTransport};

            let submitter = AnalysisSubmitter::new(api.clone(), BrowserTransport);
            leptos::task::spawn_local(async move {
                let outcome = submitter.submit(&request).await;
                let _ = workflow.try_update(|w| w.finish_submission(&ticket, outcome));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, ticket, request);
        }
    });

    let on_new_analysis = move |_| {
        workflow.update(AnalysisWorkflow::reset);
        flags.set(ReviewFlags::default());
    };

    view! {
        <header class="page-header">
            <div>
                <h2>"Image Analysis"</h2>
                <p>"Compare reference allotment maps with current satellite/drone imagery"</p>
            </div>
            <Show when=move || state.with(|s| s.result().is_some())>
                <button class="btn btn-secondary" on:click=on_new_analysis>
                    "✕ New Analysis"
                </button>
            </Show>
        </header>

        <div class="page-body">
            {move || match state.get() {
                AnalysisState::Ready(result) => {
                    let summary = ResultSummaryView::from_summary(&result.summary);
                    let rows = show_deviation_table(&result).then(|| deviation_rows(&result));
                    view! {
                        <ResultSummary summary=summary/>
                        <ResultTabs result=result tab=tab/>
                        {rows.map(|rows| view! { <DeviationTable rows=rows flags=flags/> })}
                    }
                        .into_any()
                }
                other => {
                    let error = other.error().map(|e| e.message.clone());
                    let analyzing = other.is_analyzing();
                    view! {
                        <div class="upload-row">
                            <UploadCard
                                title="Reference Map (Allotment / Base Map)"
                                heading="Upload Reference Map"
                                hint="Drag & Drop or click to select JPG/PNG from CSIDC GIS portal"
                                alt="Reference"
                                preview=slot_preview(SlotId::Reference)
                                on_files=stage(SlotId::Reference)
                            />
                            <UploadCard
                                title="Current Image (Satellite / Drone)"
                                heading="Upload Current Image"
                                hint="Drag & Drop or click to select satellite/drone JPG/PNG"
                                alt="Current"
                                preview=slot_preview(SlotId::Current)
                                on_files=stage(SlotId::Current)
                            />
                        </div>
                        {error
                            .map(|message| {
                                view! {
                                    <div class="risk-meter critical analysis-error" role="alert">
                                        <span class="risk-icon" aria-hidden="true">"⚠"</span>
                                        <div>
                                            <div class="risk-label">"Error"</div>
                                            <div class="risk-desc">{message}</div>
                                        </div>
                                    </div>
                                }
                            })}
                        <div class="submit-row">
                            <button
                                class="btn btn-primary btn-large"
                                on:click=move |_| on_submit.run(())
                                disabled=move || !submit_enabled()
                            >
                                {if analyzing {
                                    view! {
                                        <span class="spinner" aria-hidden="true"></span>
                                        "Analyzing..."
                                    }
                                        .into_any()
                                } else {
                                    "⚡ Run Change Detection Analysis".into_any()
                                }}
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
