//! 遅延実行
//!
//! `delay` は呼び出しをタイマーとして登録してすぐに戻る。登録されたタイマーは
//! [`EventLoop`] を駆動するスレッド上で、期限順に1つずつ実行される。
//! 期限が同じタイマーは登録順。ワーカースレッドは使わない。

use super::value_helpers::{get_arg, get_int_arg};
use crate::check_args;
use crate::error::{Result, UnderbarError};
use crate::i18n::{fmt_msg, MsgKey};
use crate::value::{NativeFn, Value};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// 登録済みタイマーの識別子（登録順の連番）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// 1回分の遅延呼び出し
struct Timer {
    deadline: Instant,
    id: TimerId,
    func: Arc<NativeFn>,
    args: Vec<Value>,
}

// (deadline, id) の順で比較する
impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timer {}

/// タイマー登録用のハンドル
///
/// クローン可能で、遅延実行中のコールバックからも使える。
#[derive(Clone)]
pub struct Scheduler {
    sender: Sender<Timer>,
    next_id: Arc<AtomicU64>,
}

impl Scheduler {
    fn schedule(&self, func: Arc<NativeFn>, wait: Duration, args: Vec<Value>) -> Result<TimerId> {
        let id = TimerId(self.next_id.fetch_add(1, AtomicOrdering::Relaxed));
        let name = func.name().to_string();
        let timer = Timer {
            deadline: Instant::now() + wait,
            id,
            func,
            args,
        };
        self.sender
            .send(timer)
            .map_err(|_| UnderbarError::scheduler_closed("delay"))?;
        debug!(
            timer = id.as_u64(),
            function = %name,
            wait_ms = wait.as_millis() as u64,
            "delay: scheduled"
        );
        Ok(id)
    }
}

/// 遅延呼び出しを実行するイベントループ
pub struct EventLoop {
    receiver: Receiver<Timer>,
    scheduler: Scheduler,
    queue: BinaryHeap<Reverse<Timer>>,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        EventLoop {
            receiver,
            scheduler: Scheduler {
                sender,
                next_id: Arc::new(AtomicU64::new(0)),
            },
            queue: BinaryHeap::new(),
        }
    }

    /// タイマー登録用のハンドルを取得
    pub fn scheduler(&self) -> Scheduler {
        self.scheduler.clone()
    }

    /// 未実行のタイマー数
    pub fn pending(&self) -> usize {
        self.queue.len() + self.receiver.len()
    }

    /// タイマーが無くなるまで実行する。実行したコールバック数を返す
    ///
    /// 次の期限まではチャネルを待つので、他のスレッドからの登録も受け付ける。
    pub fn run(&mut self) -> Result<usize> {
        let mut fired = 0;
        loop {
            self.drain_registrations();
            let Some(Reverse(next)) = self.queue.peek() else {
                break;
            };

            let now = Instant::now();
            if next.deadline > now {
                match self.receiver.recv_timeout(next.deadline - now) {
                    Ok(timer) => self.queue.push(Reverse(timer)),
                    Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
                }
                continue;
            }

            if let Some(Reverse(timer)) = self.queue.pop() {
                fire(timer);
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// 期限を過ぎたタイマーだけを実行する（待たない）
    ///
    /// 実行中のコールバックが登録したタイマーは次回の呼び出しで扱う。
    pub fn run_due(&mut self) -> Result<usize> {
        self.drain_registrations();
        let now = Instant::now();
        let mut due = Vec::new();
        while self
            .queue
            .peek()
            .is_some_and(|Reverse(timer)| timer.deadline <= now)
        {
            if let Some(Reverse(timer)) = self.queue.pop() {
                due.push(timer);
            }
        }

        let fired = due.len();
        for timer in due {
            fire(timer);
        }
        Ok(fired)
    }

    fn drain_registrations(&mut self) {
        for timer in self.receiver.try_iter() {
            self.queue.push(Reverse(timer));
        }
    }
}

/// タイマーを実行。コールバックのエラーはログに残してループを続ける
fn fire(timer: Timer) {
    trace!(timer = timer.id.as_u64(), function = timer.func.name(), "delay: firing");
    if let Err(err) = timer.func.call(&timer.args) {
        warn!(
            "{}",
            fmt_msg(MsgKey::CallbackFailed, &[timer.func.name(), &err.to_string()])
        );
    }
}

/// delay - wait_msミリ秒後に `func(args)` を実行するよう登録する
///
/// すぐに戻る。実行はEventLoopを駆動するスレッドで行われる。
pub fn delay(
    scheduler: &Scheduler,
    func: &Value,
    wait_ms: u64,
    args: Vec<Value>,
) -> Result<TimerId> {
    let func = func.as_function("delay")?.clone();
    scheduler.schedule(func, Duration::from_millis(wait_ms), args)
}

/// delay - (delay f wait args...)
///
/// Schedulerが必要なためレジストリには登録しない。戻り値はタイマーID。
pub fn native_delay(scheduler: &Scheduler, args: &[Value]) -> Result<Value> {
    check_args!(args, 2.., "delay");
    let func = get_arg(args, 0, "delay")?;
    let wait = get_int_arg(args, 1, "delay")?;
    let wait = u64::try_from(wait).map_err(|_| UnderbarError::out_of_range("delay", "wait"))?;
    let id = delay(scheduler, func, wait, args[2..].to_vec())?;
    Ok(Value::Integer(id.as_u64() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use parking_lot::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, label: &str) -> Value {
        let log = log.clone();
        let label = label.to_string();
        Value::function(label.clone(), move |args| {
            let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            log.lock().push(format!("{}({})", label, rendered.join(",")));
            Ok(Value::Nil)
        })
    }

    #[test]
    fn test_delay_returns_before_firing() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        let scheduler = event_loop.scheduler();

        delay(&scheduler, &recorder(&log, "hi"), 0, vec![Value::Integer(1)]).unwrap();
        assert!(log.lock().is_empty());
        assert_eq!(event_loop.pending(), 1);

        assert_eq!(event_loop.run().unwrap(), 1);
        assert_eq!(*log.lock(), vec!["hi(1)".to_string()]);
        assert_eq!(event_loop.pending(), 0);
    }

    #[test]
    fn test_fires_in_deadline_then_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        let scheduler = event_loop.scheduler();

        delay(&scheduler, &recorder(&log, "late"), 20, vec![]).unwrap();
        delay(&scheduler, &recorder(&log, "a"), 0, vec![]).unwrap();
        delay(&scheduler, &recorder(&log, "b"), 0, vec![]).unwrap();

        assert_eq!(event_loop.run().unwrap(), 3);
        assert_eq!(*log.lock(), vec!["a()", "b()", "late()"]);
    }

    #[test]
    fn test_callback_error_does_not_stop_loop() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        let scheduler = event_loop.scheduler();

        let failing = Value::function("boom", |_| Err(UnderbarError::from("boom")));
        delay(&scheduler, &failing, 0, vec![]).unwrap();
        delay(&scheduler, &recorder(&log, "after"), 1, vec![]).unwrap();

        assert_eq!(event_loop.run().unwrap(), 2);
        assert_eq!(*log.lock(), vec!["after()"]);
    }

    #[test]
    fn test_callback_can_schedule_more() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        let scheduler = event_loop.scheduler();

        let inner = recorder(&log, "inner");
        let chained = scheduler.clone();
        let outer = Value::function("outer", move |_| {
            delay(&chained, &inner, 0, vec![Value::from("x")])?;
            Ok(Value::Nil)
        });
        delay(&scheduler, &outer, 0, vec![]).unwrap();

        assert_eq!(event_loop.run().unwrap(), 2);
        assert_eq!(*log.lock(), vec!["inner(\"x\")"]);
    }

    #[test]
    fn test_run_due_does_not_wait() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut event_loop = EventLoop::new();
        let scheduler = event_loop.scheduler();

        delay(&scheduler, &recorder(&log, "now"), 0, vec![]).unwrap();
        delay(&scheduler, &recorder(&log, "later"), 60_000, vec![]).unwrap();

        assert_eq!(event_loop.run_due().unwrap(), 1);
        assert_eq!(*log.lock(), vec!["now()"]);
        assert_eq!(event_loop.pending(), 1);
    }

    #[test]
    fn test_native_delay_validation() {
        let event_loop = EventLoop::new();
        let scheduler = event_loop.scheduler();
        let noop = Value::function("noop", |_| Ok(Value::Nil));

        let err = native_delay(&scheduler, &[noop.clone(), Value::Integer(-1)]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E0102);
        assert!(native_delay(&scheduler, &[Value::Integer(1), Value::Integer(0)])
            .unwrap_err()
            .is_invalid_argument());

        let first = native_delay(&scheduler, &[noop.clone(), Value::Integer(0)]).unwrap();
        let second = native_delay(&scheduler, &[noop, Value::Integer(0), Value::Nil]).unwrap();
        assert_eq!(first, Value::Integer(0));
        assert_eq!(second, Value::Integer(1));
        assert_eq!(event_loop.pending(), 2);
    }

    #[test]
    fn test_delay_after_loop_dropped() {
        let scheduler = EventLoop::new().scheduler();
        let noop = Value::function("noop", |_| Ok(Value::Nil));
        let err = delay(&scheduler, &noop, 0, vec![]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E0301);
    }
}
