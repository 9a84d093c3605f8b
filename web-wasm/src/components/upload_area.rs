//! アップロードエリアコンポーネント

use doc_verify_common::orchestrator::Phase;
use doc_verify_common::FormState;
use futures::channel::oneshot;
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement, ProgressEvent};

const PROMPT_PLACEHOLDER: &str =
    "例: 顔写真が後から貼り付けられていないか重点的に確認してください...";

#[component]
pub fn UploadArea<F, FA>(
    form: RwSignal<FormState>,
    #[prop(into)] phase: Signal<Phase>,
    on_file_selected: F,
    on_analyze: FA,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone,
    FA: Fn(()) + 'static + Clone,
{
    let is_submitting = move || phase.get() == Phase::Submitting;
    let can_submit = move || form.with(|f| f.can_submit(phase.get()));

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file_selected(file);
        }
    };

    // 画像ならプレビュー、それ以外はファイル名とサイズ
    let selected_view = move || {
        form.with(|f| match (f.file(), f.preview()) {
            (_, Some(preview)) => Some(
                view! {
                    <div class="preview">
                        <img src=preview.to_string() alt="Preview" />
                    </div>
                }
                .into_any(),
            ),
            (Some(file), None) => Some(
                view! {
                    <div class="file-card">
                        <span class="file-icon">"📄"</span>
                        <div>
                            <p class="file-name">{file.name.clone()}</p>
                            <p class="text-muted">{file.size_label()}</p>
                        </div>
                    </div>
                }
                .into_any(),
            ),
            (None, None) => None,
        })
    };

    view! {
        <div class="upload-area">
            {selected_view}

            <div class="form-group">
                <label for="prompt">
                    "追加の指示 "
                    <span class="text-muted">"（任意・空欄なら既定の解析）"</span>
                </label>
                <textarea
                    id="prompt"
                    rows="3"
                    placeholder=PROMPT_PLACEHOLDER
                    prop:value=move || form.with(|f| f.prompt.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.set_prompt(value));
                    }
                />
            </div>

            <input
                type="file"
                accept="image/*,application/pdf"
                prop:disabled=is_submitting
                on:change=on_change
            />

            <button
                class="btn btn-primary"
                disabled=move || !can_submit()
                on:click={
                    let on_analyze = on_analyze.clone();
                    move |_| on_analyze(())
                }
            >
                {move || if is_submitting() { "解析中..." } else { "解析する" }}
            </button>
        </div>
    }
}

/// ファイルをData URLとして読み込む
pub async fn read_data_url(file: &File) -> Result<String, String> {
    let reader = FileReader::new().map_err(|e| format!("{:?}", e))?;
    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let on_load = {
        let reader = reader.clone();
        let tx = tx.clone();
        Closure::wrap(Box::new(move |_: ProgressEvent| {
            let result = reader
                .result()
                .ok()
                .and_then(|value| value.as_string())
                .ok_or_else(|| "読み込み結果が文字列ではありません".to_string());
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(result);
            }
        }) as Box<dyn FnMut(_)>)
    };
    let on_error = {
        let tx = tx.clone();
        Closure::wrap(Box::new(move |_: ProgressEvent| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err("ファイルの読み込みに失敗しました".to_string()));
            }
        }) as Box<dyn FnMut(_)>)
    };

    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    reader
        .read_as_data_url(file)
        .map_err(|e| format!("{:?}", e))?;

    let result = rx
        .await
        .map_err(|_| "読み込みが中断されました".to_string())?;

    reader.set_onload(None);
    reader.set_onerror(None);
    drop(on_load);
    drop(on_error);

    result
}
