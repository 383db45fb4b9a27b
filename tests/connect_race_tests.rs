//! Overlapping connect() calls: last-resolved-wins
//!
//! A provider whose answers are released by the test lets two connects sit
//! suspended at once and resolve in a chosen order.

use async_trait::async_trait;
use educhain::storage::{DurableStorage, WALLET_ADDRESS_KEY};
use educhain::{ConnectError, Installed, MemoryStorage, ProviderError, Session, WalletProvider};
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

const FIRST: &str = "0x1111111111111111111111111111111111111111";
const SECOND: &str = "0x2222222222222222222222222222222222222222";

type Answer = Result<Vec<String>, ProviderError>;

/// Each request waits on the next scripted oneshot.
struct DeferredWallet {
    pending: RefCell<VecDeque<oneshot::Receiver<Answer>>>,
}

impl DeferredWallet {
    fn new(count: usize) -> (Self, Vec<oneshot::Sender<Answer>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) = (0..count).map(|_| oneshot::channel()).unzip();
        (Self { pending: RefCell::new(receivers) }, senders)
    }
}

#[async_trait(?Send)]
impl WalletProvider for DeferredWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let answer = self.pending.borrow_mut().pop_front();
        match answer {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(ProviderError::new("prompt dismissed"))),
            None => Err(ProviderError::new("unexpected request")),
        }
    }
}

fn session(count: usize) -> (MemoryStorage, Session, Vec<oneshot::Sender<Answer>>) {
    let storage = MemoryStorage::new();
    let (wallet, senders) = DeferredWallet::new(count);
    let session = Session::new(Rc::new(storage.clone()), Rc::new(Installed::new(wallet)));
    (storage, session, senders)
}

fn accounts(address: &str) -> Answer {
    Ok(vec![address.to_string()])
}

/// Test: started A then B, B resolves first, A resolves last → A wins
#[tokio::test]
async fn later_resolution_overwrites_earlier() {
    let (storage, session, mut senders) = session(2);
    let wallet = session.wallet();

    let mut a = Box::pin(wallet.connect());
    let mut b = Box::pin(wallet.connect());
    assert!(futures::poll!(a.as_mut()).is_pending());
    assert!(futures::poll!(b.as_mut()).is_pending());
    assert_eq!(wallet.address(), None);

    let tx_b = senders.pop().expect("b");
    let tx_a = senders.pop().expect("a");

    tx_b.send(accounts(SECOND)).expect("send b");
    assert_eq!(b.await.as_deref(), Ok(SECOND));
    assert_eq!(wallet.address().as_deref(), Some(SECOND));

    tx_a.send(accounts(FIRST)).expect("send a");
    assert_eq!(a.await.as_deref(), Ok(FIRST));
    assert_eq!(wallet.address().as_deref(), Some(FIRST));
    assert_eq!(storage.get(WALLET_ADDRESS_KEY).unwrap().as_deref(), Some(FIRST));
}

/// Test: resolving in start order leaves the second caller's account
#[tokio::test]
async fn in_order_resolution_keeps_second() {
    let (storage, session, senders) = session(2);
    let wallet = session.wallet();
    let mut senders = senders.into_iter();
    let (tx_a, tx_b) = (senders.next().expect("a"), senders.next().expect("b"));

    let (ra, rb, ()) = futures::join!(wallet.connect(), wallet.connect(), async move {
        tx_a.send(accounts(FIRST)).expect("send a");
        tx_b.send(accounts(SECOND)).expect("send b");
    });

    assert_eq!(ra.as_deref(), Ok(FIRST));
    assert_eq!(rb.as_deref(), Ok(SECOND));
    assert_eq!(wallet.address().as_deref(), Some(SECOND));
    assert_eq!(storage.get(WALLET_ADDRESS_KEY).unwrap().as_deref(), Some(SECOND));
}

/// Test: the later call failing does not undo the earlier success
#[tokio::test]
async fn late_failure_keeps_earlier_success() {
    let (storage, session, mut senders) = session(2);
    let wallet = session.wallet();

    let mut a = Box::pin(wallet.connect());
    let mut b = Box::pin(wallet.connect());
    assert!(futures::poll!(a.as_mut()).is_pending());
    assert!(futures::poll!(b.as_mut()).is_pending());

    let tx_b = senders.pop().expect("b");
    let tx_a = senders.pop().expect("a");

    tx_a.send(accounts(FIRST)).expect("send a");
    assert!(a.await.is_ok());

    tx_b.send(Err(ProviderError::new("User rejected the request."))).expect("send b");
    let err = b.await.unwrap_err();
    assert_eq!(err, ConnectError::ProviderFailure("User rejected the request.".into()));

    assert_eq!(wallet.address().as_deref(), Some(FIRST));
    assert_eq!(storage.get(WALLET_ADDRESS_KEY).unwrap().as_deref(), Some(FIRST));
}

/// Test: a dismissed prompt (provider drops the request) is a failure
#[tokio::test]
async fn dismissed_prompt_is_provider_failure() {
    let (_, session, senders) = session(1);
    drop(senders);

    let err = session.wallet().connect().await.unwrap_err();
    assert!(matches!(err, ConnectError::ProviderFailure(ref m) if m == "prompt dismissed"));
    assert!(!session.wallet().is_connected());
}
