//! Reference resolution for task-bearing resources.
//!
//! Actions and executes name their hosts with plain strings ("web01", a
//! group name, or "all") or carry already-bound host objects. Reports name
//! executes the same way. Resolution replaces those references with the
//! matching resources from the scenario graph and records the full host
//! list alongside, for evaluators that need global context.

use crate::scenario::{Execute, Host, HostBound, Reference, Report};
use crate::{wlog_debug, wlog_warn, Error, Result};

/// Reference that selects every host in the scenario.
pub const ALL_HOSTS: &str = "all";

/// Outcome of resolving a host reference list.
#[derive(Debug, Clone, PartialEq)]
pub struct HostTargets {
    /// Bound hosts when anything matched, otherwise the original references.
    pub hosts: Vec<Reference<Host>>,
    /// Every host in the scenario, in scenario order.
    pub all_hosts: Vec<Host>,
    /// Declared reference names that matched no host.
    pub unmatched: Vec<String>,
}

impl HostTargets {
    /// The hosts that were bound by resolution.
    pub fn selected(&self) -> Vec<&Host> {
        self.hosts.iter().filter_map(Reference::bound).collect()
    }
}

/// Resolve host references against the scenario hosts.
///
/// With plain-name references a host is selected when "all" is referenced,
/// when its name is referenced, or when one of its groups is. With bound
/// references a host is selected when its name equals a referenced name or
/// contains it, so counted instances ("web_0", "web_1") match their base
/// resource "web". Zero matches is not an error: the references are left
/// as declared. References that matched nothing are listed in
/// [`HostTargets::unmatched`] and logged at WARN.
pub fn resolve_hosts(hosts: &[Host], refs: &[Reference<Host>]) -> HostTargets {
    let mut selected = Vec::new();
    let mut all_hosts = Vec::with_capacity(hosts.len());
    let unmatched: Vec<String>;

    if refs.iter().all(Reference::is_name) {
        let names: Vec<&str> = refs.iter().map(Reference::name).collect();
        let wildcard = names.contains(&ALL_HOSTS);
        unmatched = names
            .iter()
            .filter(|n| **n != ALL_HOSTS)
            .filter(|n| !hosts.iter().any(|h| h.name == **n || h.in_group(n)))
            .map(|n| n.to_string())
            .collect();

        for host in hosts {
            all_hosts.push(host.clone());
            if wildcard || names.contains(&host.name.as_str()) {
                selected.push(host.clone());
                continue;
            }
            if host.groups.iter().any(|g| names.contains(&g.as_str())) {
                selected.push(host.clone());
            }
        }
    } else {
        for host in hosts {
            all_hosts.push(host.clone());
            if refs.iter().any(|r| matches_object(host, r.name())) {
                selected.push(host.clone());
            }
        }
        unmatched = refs
            .iter()
            .map(Reference::name)
            .filter(|name| !hosts.iter().any(|h| matches_object(h, name)))
            .map(str::to_string)
            .collect();
    }

    wlog_debug!(
        "resolve_hosts: refs={:?} selected={} of {}",
        refs.iter().map(Reference::name).collect::<Vec<_>>(),
        selected.len(),
        hosts.len()
    );

    if !unmatched.is_empty() {
        wlog_warn!("resolve_hosts: references matched no host: {:?}", unmatched);
    }
    if selected.is_empty() && !refs.is_empty() {
        wlog_warn!("resolve_hosts: no hosts selected; keeping references as declared");
    }

    let hosts = if selected.is_empty() {
        refs.to_vec()
    } else {
        selected.into_iter().map(Reference::Bound).collect()
    };

    HostTargets {
        hosts,
        all_hosts,
        unmatched,
    }
}

/// Object-mode match: equal names, or a counted instance of the named base.
fn matches_object(host: &Host, name: &str) -> bool {
    host.name == name || (!name.is_empty() && host.name.contains(name))
}

/// Binds scenario references for one pipeline task at a time.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    hosts: &'a [Host],
    executes: &'a [Execute],
    strict_executes: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(hosts: &'a [Host]) -> Self {
        Self {
            hosts,
            executes: &[],
            strict_executes: false,
        }
    }

    /// Executes available to reports.
    pub fn with_executes(mut self, executes: &'a [Execute]) -> Self {
        self.executes = executes;
        self
    }

    /// Fail report resolution when no execute matches instead of falling
    /// back to the whole host list.
    pub fn strict_executes(mut self, strict: bool) -> Self {
        self.strict_executes = strict;
        self
    }

    /// Return `resource` with its host references bound.
    pub fn bind_hosts<T: HostBound>(&self, resource: T) -> T {
        let targets = resolve_hosts(self.hosts, resource.host_refs());
        resource.with_hosts(targets.hosts, targets.all_hosts)
    }

    /// Return `report` with its execute references bound.
    ///
    /// Each matched execute has its own host references bound too, so the
    /// report can inject host data through it. When no execute matches the
    /// report keeps its references and receives the whole host list, unless
    /// strict mode is on, in which case this fails.
    pub fn bind_executes(&self, mut report: Report) -> Result<Report> {
        let bound: Vec<Reference<Execute>> = self
            .executes
            .iter()
            .filter(|e| report.executes.iter().any(|r| r.name() == e.name))
            .map(|e| Reference::Bound(self.bind_hosts(e.clone())))
            .collect();

        if bound.is_empty() {
            let names: Vec<String> = report.executes.iter().map(|r| r.name().to_string()).collect();
            if self.strict_executes {
                return Err(Error::NoMatchingExecute(names));
            }
            wlog_warn!(
                "Report {} matched no executes {:?}; assigning all {} hosts",
                report.name,
                names,
                self.hosts.len()
            );
            report.all_hosts = self.hosts.to_vec();
        } else {
            wlog_debug!("Report {} bound {} executes", report.name, bound.len());
            report.executes = bound;
        }
        Ok(report)
    }
}

/// Resolve a report's execute references; see [`Resolver::bind_executes`].
pub fn resolve_executes(executes: &[Execute], hosts: &[Host], report: Report) -> Result<Report> {
    Resolver::new(hosts).with_executes(executes).bind_executes(report)
}
