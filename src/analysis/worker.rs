//! 백그라운드 분석 스레드.
//!
//! 무거운 CSV 분석을 메인(UI) 스레드 밖에서 돌리고 채널로 진행률과 결과를 돌려준다.

use crossbeam_channel::{Receiver, Sender};
use std::thread;

use super::{perform_analysis, AnalysisError, AnalysisReport};

/// UI → 작업 스레드 요청.
#[derive(Debug, Clone)]
pub enum AnalysisRequest {
    Run { csv_data: String },
}

/// 작업 스레드 → UI 응답.
#[derive(Debug, Clone)]
pub enum AnalysisResponse {
    Progress(f64),
    Finished(AnalysisReport),
    Failed(AnalysisError),
}

/// 작업 스레드와 통신하는 핸들. 드롭되면 요청 채널이 닫혀 스레드도 끝난다.
pub struct AnalysisWorker {
    tx: Sender<AnalysisRequest>,
    rx: Receiver<AnalysisResponse>,
}

impl AnalysisWorker {
    /// 작업 스레드를 띄운다.
    pub fn spawn() -> Self {
        let (req_tx, req_rx) = crossbeam_channel::unbounded::<AnalysisRequest>();
        let (resp_tx, resp_rx) = crossbeam_channel::unbounded::<AnalysisResponse>();

        thread::spawn(move || {
            log::info!("analysis worker started");
            while let Ok(req) = req_rx.recv() {
                match req {
                    AnalysisRequest::Run { csv_data } => {
                        let progress_tx = resp_tx.clone();
                        let mut on_progress = |p: f64| {
                            let _ = progress_tx.send(AnalysisResponse::Progress(p));
                        };
                        let resp = match perform_analysis(&csv_data, &mut on_progress) {
                            Ok(report) => AnalysisResponse::Finished(report),
                            Err(e) => {
                                log::warn!("analysis failed: {e}");
                                AnalysisResponse::Failed(e)
                            }
                        };
                        let _ = resp_tx.send(resp);
                    }
                }
            }
            log::info!("analysis worker stopped");
        });

        Self {
            tx: req_tx,
            rx: resp_rx,
        }
    }

    /// 분석 요청을 보낸다(블로킹 없음).
    pub fn send(&self, req: AnalysisRequest) -> Result<(), AnalysisError> {
        self.tx
            .send(req)
            .map_err(|_| AnalysisError::WorkerDisconnected)
    }

    /// 응답이 있으면 하나 꺼낸다(블로킹 없음).
    pub fn try_recv(&self) -> Option<AnalysisResponse> {
        self.rx.try_recv().ok()
    }

    /// 요청을 보내고 끝날 때까지 기다린다. 진행률은 `on_progress`로 전달된다.
    pub fn run_blocking(
        &self,
        csv_data: String,
        on_progress: &mut dyn FnMut(f64),
    ) -> Result<AnalysisReport, AnalysisError> {
        self.send(AnalysisRequest::Run { csv_data })?;
        loop {
            match self.rx.recv() {
                Ok(AnalysisResponse::Progress(p)) => on_progress(p),
                Ok(AnalysisResponse::Finished(report)) => return Ok(report),
                Ok(AnalysisResponse::Failed(e)) => return Err(e),
                Err(_) => return Err(AnalysisError::WorkerDisconnected),
            }
        }
    }
}
