use eframe::{self, egui};
use egui::ViewportBuilder;
use egui_extras::{Column, TableBuilder};

use super::state::{Confirmation, EditorState, HeaderEditorState, Toast};
use crate::error::AppError;
use crate::models::{HeaderConfig, Theme};
use crate::numeric::format_quantity;
use crate::sheet;
use crate::storage::Storage;
use crate::store::{RecordStore, SavePlan};

enum RowAction {
    Edit(usize),
    Delete(usize),
}

pub struct InventoryApp {
    store: RecordStore,
    storage: Storage,
    theme: Theme,
    header: HeaderConfig,
    filter_text: String,
    editor: EditorState,
    header_editor: HeaderEditorState,
    confirmation: Option<Confirmation>,
    toast: Option<Toast>,
}

impl InventoryApp {
    pub fn new(storage: Storage) -> Self {
        let store = RecordStore::from_records(storage.load_records());
        let theme = storage.load_theme();
        let header = storage.load_header();
        log::info!("Loaded {} records from storage", store.len());
        Self {
            store,
            storage,
            theme,
            header,
            filter_text: String::new(),
            editor: EditorState::default(),
            header_editor: HeaderEditorState::default(),
            confirmation: None,
            toast: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Write-through after every mutation, best-effort.
    fn persist_records(&self) {
        self.storage.save_records(self.store.records());
    }

    fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        self.theme = theme;
        ctx.set_visuals(visuals_for(theme));
        self.storage.save_theme(theme);
    }

    fn import_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel", &["xlsx"])
            .pick_file()
        else {
            return;
        };

        let parsed = std::fs::read(&path)
            .map_err(AppError::from)
            .and_then(|bytes| sheet::read_inventory(&bytes));
        match parsed {
            Ok(records) => {
                self.store.replace_all(records);
                self.persist_records();
                self.editor.close();
                self.toast = Some(Toast::success("Archivo de inventario cargado correctamente"));
            }
            Err(e) => {
                log::error!("Failed to import {}: {}", path.display(), e);
                self.toast = Some(Toast::error("Error leyendo el archivo de Excel"));
            }
        }
    }

    fn export_file(&mut self) {
        let today = chrono::Local::now().date_naive();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel", &["xlsx"])
            .set_file_name(sheet::file_name(today))
            .save_file()
        else {
            return;
        };

        match sheet::write_inventory(&path, self.store.records(), &self.header, today) {
            Ok(()) => {
                self.toast = Some(Toast::success("Archivo de Excel generado correctamente"));
            }
            Err(e) => {
                log::error!("Failed to export {}: {}", path.display(), e);
                self.toast = Some(Toast::error("Error generando el archivo de Excel"));
            }
        }
    }

    fn save_from_editor(&mut self) {
        let record = self.editor.to_record();
        match self.store.plan_save(record, self.editor.editing) {
            Err(e) => {
                self.toast = Some(Toast::error(e.to_string()));
            }
            Ok(plan) if plan.needs_confirmation() => {
                self.confirmation = Some(Confirmation::DuplicateCode(plan));
            }
            Ok(plan) => self.commit_plan(plan),
        }
    }

    fn commit_plan(&mut self, plan: SavePlan) {
        let message = if plan.is_update() {
            "Producto actualizado"
        } else {
            "Producto agregado al inventario"
        };
        self.store.apply(plan);
        self.persist_records();
        self.editor.close();
        self.toast = Some(Toast::success(message));
    }

    fn clear_all(&mut self) {
        self.store.clear();
        self.persist_records();
        self.editor.close();
        self.toast = Some(Toast::success("Inventario vaciado"));
    }

    fn delete_record(&mut self, index: usize) {
        if self.store.remove_at(index).is_some() {
            self.persist_records();
            // Any index captured by an open editor is stale now.
            self.editor.close();
            self.toast = Some(Toast::success("Registro eliminado correctamente"));
        }
    }

    fn open_header_editor(&mut self) {
        self.header_editor.open = true;
        self.header_editor.prepared_by = self.header.prepared_by.clone();
        self.header_editor.warehouse_label = self.header.warehouse_label.clone();
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        let mut do_import = false;
        let mut do_export = false;
        let mut do_new = false;
        let mut do_header = false;
        let mut do_clear = false;
        let mut theme_changed = false;
        let mut dark = self.theme == Theme::Dark;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Inventario ASULATINA");
            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                if ui.button("Cargar Excel").clicked() {
                    do_import = true;
                }
                if ui.button("Descargar Excel").clicked() {
                    do_export = true;
                }
                if ui.button("Nuevo producto").clicked() {
                    do_new = true;
                }
                if ui.button("Encabezado").clicked() {
                    do_header = true;
                }
                if ui.button("Vaciar inventario").clicked() {
                    do_clear = true;
                }
                if ui.checkbox(&mut dark, "Tema oscuro").changed() {
                    theme_changed = true;
                }
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Buscar:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.filter_text)
                        .desired_width(260.0)
                        .hint_text("código, producto o cantidad"),
                );
            });
            ui.add_space(6.0);
        });

        if do_import {
            self.import_file();
        }
        if do_export {
            self.export_file();
        }
        if do_new {
            self.editor.open_new();
        }
        if do_header {
            self.open_header_editor();
        }
        if do_clear && !self.store.is_empty() {
            self.confirmation = Some(Confirmation::ClearAll);
        }
        if theme_changed {
            self.set_theme(ctx, if dark { Theme::Dark } else { Theme::Light });
        }
    }

    fn show_table(&mut self, ctx: &egui::Context) {
        let visible = self.store.visible_indices(&self.filter_text);
        let mut action: Option<RowAction> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.store.is_empty() {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.label("Sin registros. Cargue un archivo de Excel o agregue un producto.");
                });
                return;
            }

            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(100.0))
                .column(Column::remainder().at_least(180.0))
                .column(Column::auto().at_least(90.0))
                .column(Column::auto().at_least(90.0))
                .column(Column::auto().at_least(150.0))
                .header(22.0, |mut header| {
                    for title in ["Codigo", "Producto", "Existencia", "Físico", "Acciones"] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for &index in &visible {
                        let record = &self.store.records()[index];
                        body.row(24.0, |mut row| {
                            row.col(|ui| {
                                ui.label(&record.code);
                            });
                            row.col(|ui| {
                                ui.label(&record.description);
                            });
                            row.col(|ui| {
                                ui.label(format_quantity(record.book_qty));
                            });
                            row.col(|ui| {
                                ui.label(format_quantity(record.counted_qty));
                            });
                            row.col(|ui| {
                                if ui.small_button("Editar").clicked() {
                                    action = Some(RowAction::Edit(index));
                                }
                                if ui.small_button("Eliminar").clicked() {
                                    action = Some(RowAction::Delete(index));
                                }
                            });
                        });
                    }
                });
        });

        match action {
            Some(RowAction::Edit(index)) => {
                if let Some(record) = self.store.get(index).cloned() {
                    self.editor.open_edit(index, &record);
                }
            }
            Some(RowAction::Delete(index)) => self.delete_record(index),
            None => {}
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        let summary = self.store.summary(&self.filter_text);
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} productos visibles · Existencia total: {}",
                    summary.visible,
                    format_quantity(summary.book_total)
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "Versión del sistema: {}",
                        env!("CARGO_PKG_VERSION")
                    ));
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        if !self.editor.open {
            return;
        }
        let mut open = true;
        let mut save_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new(self.editor.title())
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("editor_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Código:");
                        ui.text_edit_singleline(&mut self.editor.code);
                        ui.end_row();
                        ui.label("Producto:");
                        ui.text_edit_singleline(&mut self.editor.description);
                        ui.end_row();
                        ui.label("Existencia:");
                        ui.text_edit_singleline(&mut self.editor.book_qty);
                        ui.end_row();
                        ui.label("Físico:");
                        ui.text_edit_singleline(&mut self.editor.counted_qty);
                        ui.end_row();
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(self.editor.save_label()).clicked() {
                        save_clicked = true;
                    }
                    if ui.button("Cancelar").clicked() {
                        cancel_clicked = true;
                    }
                });
            });

        if !open || cancel_clicked {
            self.editor.close();
        } else if save_clicked {
            self.save_from_editor();
        }
    }

    fn show_header_editor(&mut self, ctx: &egui::Context) {
        if !self.header_editor.open {
            return;
        }
        let mut open = true;
        let mut save_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new("Encabezado del reporte")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("header_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Preparado por:");
                        ui.text_edit_singleline(&mut self.header_editor.prepared_by);
                        ui.end_row();
                        ui.label("Bodega:");
                        ui.text_edit_singleline(&mut self.header_editor.warehouse_label);
                        ui.end_row();
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Guardar").clicked() {
                        save_clicked = true;
                    }
                    if ui.button("Cancelar").clicked() {
                        cancel_clicked = true;
                    }
                });
            });

        if !open || cancel_clicked {
            self.header_editor.open = false;
        } else if save_clicked {
            self.header.prepared_by = self.header_editor.prepared_by.trim().to_string();
            self.header.warehouse_label = self.header_editor.warehouse_label.trim().to_string();
            self.storage.save_header(&self.header);
            self.header_editor.open = false;
            self.toast = Some(Toast::success("Encabezado actualizado"));
        }
    }

    fn show_confirmation(&mut self, ctx: &egui::Context) {
        let Some(confirmation) = &self.confirmation else {
            return;
        };
        let message = confirmation.message();
        let mut decision: Option<bool> = None;

        egui::Window::new("Confirmar")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Aceptar").clicked() {
                        decision = Some(true);
                    }
                    if ui.button("Cancelar").clicked() {
                        decision = Some(false);
                    }
                });
            });

        match decision {
            Some(true) => match self.confirmation.take() {
                Some(Confirmation::DuplicateCode(plan)) => self.commit_plan(plan),
                Some(Confirmation::ClearAll) => self.clear_all(),
                None => {}
            },
            Some(false) => {
                // Refusal aborts the operation with no mutation.
                self.confirmation = None;
            }
            None => {}
        }
    }

    fn show_toast(&mut self, ctx: &egui::Context) {
        let Some(toast) = &self.toast else {
            return;
        };
        if toast.expired() {
            self.toast = None;
            return;
        }

        let color = if toast.is_error {
            egui::Color32::RED
        } else {
            egui::Color32::GREEN
        };
        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -40.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.colored_label(color, &toast.message);
                });
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}

impl eframe::App for InventoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_toolbar(ctx);
        self.show_status_bar(ctx);
        self.show_table(ctx);
        self.show_editor(ctx);
        self.show_header_editor(ctx);
        self.show_confirmation(ctx);
        self.show_toast(ctx);
    }
}

fn visuals_for(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    }
}

pub fn launch_gui() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([920.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Inventario ASULATINA",
        options,
        Box::new(|cc| {
            let app = InventoryApp::new(Storage::open_default());
            cc.egui_ctx.set_visuals(visuals_for(app.theme()));
            Ok(Box::new(app))
        }),
    )
}
